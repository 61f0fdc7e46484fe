use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Result alias used by the request handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised while talking to the completion provider
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    #[error("Failed to send request to {provider}: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Malformed response from {provider}: {reason}")]
    Malformed {
        provider: &'static str,
        reason: String,
    },
}

/// Errors surfaced to HTTP callers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(message) => json!({ "error": message }),
            AppError::Provider(e) => json!({
                "error": "Completion provider request failed",
                "details": e.to_string()
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Errors raised while loading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::Validation("missing required field `update`".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "Validation error: missing required field `update`"
        );
    }

    #[test]
    fn test_provider_maps_to_server_error() {
        let err = AppError::from(ProviderError::Status {
            provider: "OpenAI",
            status: 401,
            body: "invalid api key".into(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("OpenAI returned status 401"));
    }

    #[test]
    fn test_missing_key_display() {
        let err = ProviderError::MissingApiKey("OPENAI_API_KEY");
        assert_eq!(err.to_string(), "OPENAI_API_KEY environment variable not set");
    }
}
