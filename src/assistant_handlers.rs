//! Endpoints that turn project updates into generated text.
//!
//! Each handler validates its body, fills one prompt template, makes exactly one
//! completion call and returns the result. Only `/format` writes to the store.

use actix_web::{web, HttpResponse};
use tracing::{debug, error, info};

use crate::errors::AppResult;
use crate::models::{
    ActionItemsResponse, EmailRequest, EmailResponse, FormatResponse, Message,
    SentimentResponse, SummaryResponse, UpdateRequest,
};
use crate::prompts::{self, Feature};
use crate::server::AppState;

// Run a single completion for a feature, logging input and output
async fn complete_feature(
    data: &AppState,
    feature: Feature,
    project_id: &str,
    user_input: &str,
    prompt: &str,
) -> AppResult<String> {
    let tag = feature.log_tag();
    info!("[{}] project_id={} | user_input={}", tag, project_id, user_input);
    debug!("[{}] prompt={}", tag, prompt);

    let text = data
        .gateway
        .complete(data.config.system_prompt(feature), prompt, data.config.model())
        .await
        .inspect_err(|e| error!("[{}] project_id={} | provider error: {}", tag, project_id, e))?;

    info!("[{}] project_id={} | ai_response={}", tag, project_id, text);
    Ok(text)
}

// POST /format - restructure an update and record it in the project history
pub async fn format_update_handler(
    data: web::Data<AppState>,
    request: web::Json<UpdateRequest>,
) -> AppResult<HttpResponse> {
    let raw_update = request.require_update()?;
    let prompt = prompts::format_prompt(raw_update);
    let formatted =
        complete_feature(&data, Feature::Format, request.project_id(), raw_update, &prompt).await?;

    if let Some(project_id) = request.project_id.as_deref() {
        let stored = data.store.append_messages(
            project_id,
            vec![Message::user(raw_update), Message::bot(formatted.as_str())],
        );
        if !stored {
            debug!("[FORMAT] project_id={} is unknown, history not updated", project_id);
        }
    }

    Ok(HttpResponse::Ok().json(FormatResponse { formatted }))
}

// POST /summarize
pub async fn summarize_handler(
    data: web::Data<AppState>,
    request: web::Json<UpdateRequest>,
) -> AppResult<HttpResponse> {
    let raw_notes = request.require_update()?;
    let prompt = prompts::summarize_prompt(raw_notes);
    let summary =
        complete_feature(&data, Feature::Summarize, request.project_id(), raw_notes, &prompt)
            .await?;

    Ok(HttpResponse::Ok().json(SummaryResponse { summary }))
}

// POST /action-items
pub async fn action_items_handler(
    data: web::Data<AppState>,
    request: web::Json<UpdateRequest>,
) -> AppResult<HttpResponse> {
    let updates = request.require_update()?;
    let prompt = prompts::action_items_prompt(request.project_name(), updates);
    let action_items =
        complete_feature(&data, Feature::ActionItems, request.project_id(), updates, &prompt)
            .await?;

    Ok(HttpResponse::Ok().json(ActionItemsResponse {
        action_items: action_items.trim().to_string(),
    }))
}

// POST /sentiment
pub async fn sentiment_handler(
    data: web::Data<AppState>,
    request: web::Json<UpdateRequest>,
) -> AppResult<HttpResponse> {
    let updates = request.require_update()?;
    let prompt = prompts::sentiment_prompt(request.project_name(), updates);
    let sentiment =
        complete_feature(&data, Feature::Sentiment, request.project_id(), updates, &prompt)
            .await?;

    Ok(HttpResponse::Ok().json(SentimentResponse {
        sentiment: sentiment.trim().to_string(),
    }))
}

// POST /generate-email
pub async fn generate_email_handler(
    data: web::Data<AppState>,
    request: web::Json<EmailRequest>,
) -> AppResult<HttpResponse> {
    let updates = request.require_update()?;
    let prompt = prompts::email_prompt(request.project_name(), updates, request.sentiment());
    let email =
        complete_feature(&data, Feature::Email, request.project_id(), updates, &prompt).await?;

    Ok(HttpResponse::Ok().json(EmailResponse { email }))
}
