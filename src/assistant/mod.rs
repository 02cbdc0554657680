//! Client for the optional "explain with AI" collaborator.
//!
//! Sends the raw code with a canned review prompt to an OpenAI-compatible
//! chat completion endpoint and returns whatever text comes back. Nothing
//! here feeds into an [`AnalysisResult`](crate::analyze::AnalysisResult).

mod chat;

pub use chat::{completions_url, ChatMessage, ChatRequest, ChatResponse};

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AssistantConfig;

/// Errors that can occur while asking the assistant.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("no API key: set the {0} environment variable")]
    MissingApiKey(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request timed out")]
    Timeout,
    #[error("authentication rejected by the assistant endpoint")]
    Unauthorized,
    #[error("rate limited by the assistant endpoint")]
    RateLimited,
    #[error("assistant endpoint returned HTTP {status}: {body}")]
    Api { status: u16, body: String },
    #[error("assistant returned no text")]
    EmptyResponse,
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Build the review prompt around the user's code.
pub fn build_prompt(code: &str) -> String {
    format!(
        "You are an AI assistant for debugging and optimizing code.\n\
         Your tasks:\n\
         - Check for correctness\n\
         - Suggest actionable improvements\n\
         - Provide an optimized version if possible\n\
         \n\
         Here is the code to analyze:\n\
         {}\n",
        code
    )
}

/// Chat completion client.
pub struct AssistantClient {
    http: Client,
    config: AssistantConfig,
    api_key: String,
}

impl AssistantClient {
    /// Create a client, reading the API key from the configured variable.
    pub fn from_env(config: AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AssistantError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(
        config: AssistantConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, AssistantError> {
        let http = Client::builder()
            .user_agent(concat!("decode/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config,
            api_key: api_key.into(),
        })
    }

    /// Ask the assistant to review `code`; returns its free-text answer.
    pub async fn explain(&self, code: &str) -> Result<String, AssistantError> {
        let url = completions_url(&self.config.endpoint);
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(build_prompt(code))],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(url = %url, model = %self.config.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout
                } else {
                    AssistantError::Network(e)
                }
            })?;

        let status = response.status().as_u16();
        match status {
            200..=299 => {}
            401 | 403 => return Err(AssistantError::Unauthorized),
            429 => return Err(AssistantError::RateLimited),
            _ => {
                let body = response.text().await.unwrap_or_default();
                warn!(status, "assistant request failed");
                return Err(AssistantError::Api { status, body });
            }
        }

        let parsed: ChatResponse = response.json().await?;
        parsed.first_text().ok_or(AssistantError::EmptyResponse)
    }

    /// Run [`explain`](Self::explain) on a fresh runtime.
    pub fn explain_blocking(&self, code: &str) -> Result<String, AssistantError> {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.explain(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config_for(server: &MockServer) -> AssistantConfig {
        AssistantConfig {
            endpoint: server.base_url(),
            model: "test/model".to_string(),
            timeout_ms: 5_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_prompt_contains_code() {
        let prompt = build_prompt("let x = 1;");
        assert!(prompt.contains("Check for correctness"));
        assert!(prompt.ends_with("let x = 1;\n"));
    }

    #[test]
    fn test_explain_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key");
            then.status(200).json_body(json!({
                "id": "cmpl-1",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "Use const."}}
                ]
            }));
        });

        let client = AssistantClient::with_api_key(config_for(&server), "test-key").unwrap();
        let text = client.explain_blocking("var x = 1;").unwrap();

        mock.assert();
        assert_eq!(text, "Use const.");
    }

    #[test]
    fn test_explain_maps_http_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(500).body("upstream exploded");
        });

        let client = AssistantClient::with_api_key(config_for(&server), "k").unwrap();
        match client.explain_blocking("x") {
            Err(AssistantError::Api { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_explain_unauthorized() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401);
        });

        let client = AssistantClient::with_api_key(config_for(&server), "bad").unwrap();
        assert!(matches!(
            client.explain_blocking("x"),
            Err(AssistantError::Unauthorized)
        ));
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({"choices": []}));
        });

        let client = AssistantClient::with_api_key(config_for(&server), "k").unwrap();
        assert!(matches!(
            client.explain_blocking("x"),
            Err(AssistantError::EmptyResponse)
        ));
    }

    #[test]
    fn test_missing_api_key() {
        let config = AssistantConfig {
            api_key_env: "DECODE_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        match AssistantClient::from_env(config) {
            Err(AssistantError::MissingApiKey(var)) => {
                assert_eq!(var, "DECODE_TEST_KEY_THAT_IS_NEVER_SET")
            }
            _ => panic!("expected MissingApiKey"),
        }
    }
}
