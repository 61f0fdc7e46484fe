use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::ProviderError;

// LLM Provider enum
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LLMProvider {
    #[default]
    OpenAI,
    OpenRouter,
    Anthropic,
}

impl LLMProvider {
    pub fn display_name(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "OpenAI",
            LLMProvider::OpenRouter => "OpenRouter",
            LLMProvider::Anthropic => "Anthropic",
        }
    }

    pub fn api_key_var(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => "OPENAI_API_KEY",
            LLMProvider::OpenRouter => "OPENROUTER_API_KEY",
            LLMProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => DEFAULT_OPENAI_MODEL,
            LLMProvider::OpenRouter => DEFAULT_OPENROUTER_MODEL,
            LLMProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
        }
    }

    pub fn default_api_url(&self) -> &'static str {
        match self {
            LLMProvider::OpenAI => OPENAI_API_URL,
            LLMProvider::OpenRouter => OPENROUTER_API_URL,
            LLMProvider::Anthropic => ANTHROPIC_API_URL,
        }
    }
}

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4";
const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_MAX_TOKENS: u32 = 4096;

/// A single round trip to a chat-completion provider.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, ProviderError>;
}

// OpenAI-compatible chat completion response (OpenAI and OpenRouter)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

// Anthropic messages API response
#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

// LLM Provider implementation
pub struct LLMProviderImpl {
    provider_type: LLMProvider,
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl LLMProviderImpl {
    /// Build the gateway from configuration, reading the provider's API key from the environment once.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let provider = config.llm_provider;
        let api_key = env::var(provider.api_key_var()).ok();
        if api_key.is_none() {
            warn!(
                "{} is not set; completion requests will fail",
                provider.api_key_var()
            );
        }

        Self::new(
            provider,
            api_key,
            config.api_url.clone(),
            config.request_timeout(),
        )
    }

    pub fn new(
        provider_type: LLMProvider,
        api_key: Option<String>,
        api_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|source| ProviderError::Request {
                provider: provider_type.display_name(),
                source,
            })?;

        Ok(Self {
            provider_type,
            client,
            api_url: api_url.unwrap_or_else(|| provider_type.default_api_url().to_string()),
            api_key,
        })
    }

    pub fn provider_type(&self) -> LLMProvider {
        self.provider_type
    }

    fn api_key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey(self.provider_type.api_key_var()))
    }

    // Send the request and return the raw body of a successful response
    async fn post(&self, request: reqwest::RequestBuilder) -> Result<String, ProviderError> {
        let provider = self.provider_type.display_name();
        let response = request
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ProviderError::Request { provider, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                provider,
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn send_chat_completion_prompt(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, ProviderError> {
        let provider = self.provider_type.display_name();
        let api_key = self.api_key()?;

        let payload = json!({
            "model": model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        let request = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&payload);
        let body = self.post(request).await?;

        let response_body: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed {
                provider,
                reason: e.to_string(),
            })?;

        // Extract the content of the first choice
        match response_body.choices.into_iter().next() {
            Some(ChatChoice { message: ChatMessage { content: Some(content) } }) => Ok(content),
            Some(_) => Err(ProviderError::Malformed {
                provider,
                reason: "first choice has no content".to_string(),
            }),
            None => Err(ProviderError::Malformed {
                provider,
                reason: "response contains no choices".to_string(),
            }),
        }
    }

    async fn send_anthropic_prompt(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, ProviderError> {
        let provider = self.provider_type.display_name();
        let api_key = self.api_key()?;

        let payload = json!({
            "model": model,
            "system": system_prompt,
            "messages": [
                {
                    "role": "user",
                    "content": user_prompt
                }
            ],
            "max_tokens": ANTHROPIC_MAX_TOKENS
        });

        let request = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&payload);
        let body = self.post(request).await?;

        let response_body: AnthropicResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed {
                provider,
                reason: e.to_string(),
            })?;

        response_body
            .content
            .into_iter()
            .find(|block| block.content_type == "text")
            .map(|block| block.text)
            .ok_or_else(|| ProviderError::Malformed {
                provider,
                reason: "response contains no text content".to_string(),
            })
    }
}

#[async_trait]
impl CompletionGateway for LLMProviderImpl {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, ProviderError> {
        debug!(
            "Sending completion request to {} with model {}",
            self.provider_type.display_name(),
            model
        );
        match self.provider_type {
            LLMProvider::OpenAI | LLMProvider::OpenRouter => {
                self.send_chat_completion_prompt(system_prompt, user_prompt, model).await
            }
            LLMProvider::Anthropic => {
                self.send_anthropic_prompt(system_prompt, user_prompt, model).await
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedCall {
        pub system_prompt: String,
        pub user_prompt: String,
        pub model: String,
    }

    /// Gateway double that replies with a fixed result and records every call.
    pub struct ScriptedGateway {
        reply: Result<String, String>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl ScriptedGateway {
        pub fn replying(text: &str) -> Self {
            Self { reply: Ok(text.to_string()), calls: Mutex::new(Vec::new()) }
        }

        pub fn failing(body: &str) -> Self {
            Self { reply: Err(body.to_string()), calls: Mutex::new(Vec::new()) }
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for ScriptedGateway {
        async fn complete(
            &self,
            system_prompt: &str,
            user_prompt: &str,
            model: &str,
        ) -> Result<String, ProviderError> {
            self.calls.lock().push(RecordedCall {
                system_prompt: system_prompt.to_string(),
                user_prompt: user_prompt.to_string(),
                model: model.to_string(),
            });
            self.reply.clone().map_err(|body| ProviderError::Status {
                provider: "Scripted",
                status: 503,
                body,
            })
        }
    }
}
