use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

// Define the structure for a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
        }
    }
}

// Who produced a stored message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

// One turn of a project's conversation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self { role: Role::Bot, content: content.into() }
    }
}

// Request body for creating a project
#[derive(Debug, Default, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Request body shared by the format, summarize, action-items and sentiment endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub update: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
}

impl UpdateRequest {
    pub fn require_update(&self) -> Result<&str, AppError> {
        require_update(self.update.as_deref())
    }

    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or_default()
    }

    pub fn project_id(&self) -> &str {
        self.project_id.as_deref().unwrap_or_default()
    }
}

/// Request body for the generate-email endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub update: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl EmailRequest {
    pub fn require_update(&self) -> Result<&str, AppError> {
        require_update(self.update.as_deref())
    }

    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or_default()
    }

    pub fn project_id(&self) -> &str {
        self.project_id.as_deref().unwrap_or_default()
    }

    pub fn sentiment(&self) -> &str {
        self.sentiment.as_deref().unwrap_or_default()
    }
}

fn require_update(update: Option<&str>) -> Result<&str, AppError> {
    match update {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(AppError::Validation("field `update` must not be blank".to_string())),
        None => Err(AppError::Validation("missing required field `update`".to_string())),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatResponse {
    pub formatted: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActionItemsResponse {
    pub action_items: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SentimentResponse {
    pub sentiment: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmailResponse {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutSessionResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_is_uuid() {
        let project = Project::new("Alpha".to_string());
        assert!(Uuid::parse_str(&project.id).is_ok());

        let other = Project::new("Alpha".to_string());
        assert_ne!(project.id, other.id);
    }

    #[test]
    fn test_message_role_serializes_lowercase() {
        let json = serde_json::to_value(Message::bot("done")).unwrap();
        assert_eq!(json["role"], "bot");
        assert_eq!(json["content"], "done");

        let parsed: Message = serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(parsed, Message::user("hi"));
    }

    #[test]
    fn test_update_request_requires_update() {
        let request: UpdateRequest = serde_json::from_str(r#"{"project_id":"abc"}"#).unwrap();
        assert!(matches!(request.require_update(), Err(AppError::Validation(_))));

        let blank: UpdateRequest = serde_json::from_str(r#"{"update":"   "}"#).unwrap();
        assert!(matches!(blank.require_update(), Err(AppError::Validation(_))));

        let ok: UpdateRequest = serde_json::from_str(r#"{"update":"shipped v2"}"#).unwrap();
        assert_eq!(ok.require_update().unwrap(), "shipped v2");
        assert_eq!(ok.project_name(), "");
    }

    #[test]
    fn test_email_request_defaults_optional_fields() {
        let request: EmailRequest = serde_json::from_str(r#"{"update":"x","project_name":null}"#).unwrap();
        assert_eq!(request.project_name(), "");
        assert_eq!(request.sentiment(), "");
        assert_eq!(request.project_id(), "");
    }
}
