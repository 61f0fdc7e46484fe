use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;

use crate::assistant_handlers::{
    action_items_handler, format_update_handler, generate_email_handler, sentiment_handler,
    summarize_handler,
};
use crate::billing_handlers::create_checkout_session_handler;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::llm_handler::CompletionGateway;
use crate::project_handlers::{
    create_project_handler, get_project_messages_handler, get_projects_handler,
};
use crate::project_store::ProjectStore;

// Shared state handed to every handler
pub struct AppState {
    pub store: Arc<ProjectStore>,
    pub gateway: Arc<dyn CompletionGateway>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            store: Arc::new(ProjectStore::new()),
            gateway,
            config: Arc::new(config),
        }
    }
}

// Reject unparsable JSON bodies with the same error shape as other validation failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(err.to_string()).into())
}

/// Register every API route. Used by the server and by the handler tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/projects", web::get().to(get_projects_handler))
        .route("/projects", web::post().to(create_project_handler))
        .route(
            "/projects/{project_id}/messages",
            web::get().to(get_project_messages_handler),
        )
        .route("/format", web::post().to(format_update_handler))
        .route("/summarize", web::post().to(summarize_handler))
        .route("/action-items", web::post().to(action_items_handler))
        .route("/sentiment", web::post().to(sentiment_handler))
        .route("/generate-email", web::post().to(generate_email_handler))
        .route(
            "/create-checkout-session",
            web::post().to(create_checkout_session_handler),
        );
}

pub async fn run_server(state: AppState) -> std::io::Result<()> {
    let bind_address = state.config.bind_address();
    info!(
        "Starting server at http://{}:{} (provider model {})",
        bind_address.0, bind_address.1, state.config.model()
    );

    let app_state = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .configure(configure_api)
    })
    .bind(bind_address)?
    .run()
    .await
}
