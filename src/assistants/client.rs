use super::api::AssistantsApi;
use super::types::{
    Assistant, AssistantDefinition, ListResponse, Message, MessageRole, Run, RunStep, Thread,
    ToolOutput,
};
use crate::config::{Settings, DEFAULT_OPENAI_BASE_URL, DEFAULT_REQUEST_TIMEOUT};
use crate::error::{AgentError, Result};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

const ASSISTANTS_BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// HTTP client for the OpenAI assistants endpoints
#[derive(Clone, Debug)]
pub struct AssistantsClient {
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl AssistantsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.openai_api_key.clone(),
            base_url: settings.openai_base_url.clone(),
            timeout: settings.request_timeout,
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AgentError::Config(
                "OPENAI_API_KEY environment variable must be set to call the assistants API"
                    .to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| AgentError::Unknown(format!("Failed to build HTTP client: {err}")))?;

        let request_url = build_url(&self.base_url, path);
        debug!(%method, url = %request_url, "Assistants API request");

        let mut request = client
            .request(method, &request_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header(ASSISTANTS_BETA_HEADER.0, ASSISTANTS_BETA_HEADER.1);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let response_text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(AgentError::RateLimit { retry_after });
        }

        if !status.is_success() {
            let api_message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|json| {
                    json.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            return Err(AgentError::Api {
                status: status.as_u16(),
                message: api_message,
            });
        }

        decode(&response_text, path)
    }
}

fn decode<T: DeserializeOwned>(text: &str, path: &str) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        AgentError::Unknown(format!(
            "Failed to decode response from '{}' at {}: {}",
            path,
            err.path(),
            err.inner()
        ))
    })
}

fn build_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[async_trait]
impl AssistantsApi for AssistantsClient {
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.request(Method::GET, &format!("assistants/{assistant_id}"), None)
            .await
    }

    async fn create_assistant(&self, definition: &AssistantDefinition) -> Result<Assistant> {
        let body = serde_json::to_value(definition)?;
        self.request(Method::POST, "assistants", Some(&body)).await
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        self.request(Method::GET, &format!("threads/{thread_id}"), None)
            .await
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.request(Method::POST, "threads", Some(&json!({}))).await
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message> {
        let body = json!({
            "role": role,
            "content": content,
        });
        self.request(
            Method::POST,
            &format!("threads/{thread_id}/messages"),
            Some(&body),
        )
        .await
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        instructions: &str,
    ) -> Result<Run> {
        let body = json!({
            "assistant_id": assistant_id,
            "instructions": instructions,
        });
        self.request(Method::POST, &format!("threads/{thread_id}/runs"), Some(&body))
            .await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.request(
            Method::GET,
            &format!("threads/{thread_id}/runs/{run_id}"),
            None,
        )
        .await
    }

    async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>> {
        let page: ListResponse<RunStep> = self
            .request(
                Method::GET,
                &format!("threads/{thread_id}/runs/{run_id}/steps?order=asc"),
                None,
            )
            .await?;
        Ok(page.data)
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: &[ToolOutput],
    ) -> Result<Run> {
        let body = json!({ "tool_outputs": tool_outputs });
        self.request(
            Method::POST,
            &format!("threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            Some(&body),
        )
        .await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        let page: ListResponse<Message> = self
            .request(
                Method::GET,
                &format!("threads/{thread_id}/messages?order=desc"),
                None,
            )
            .await?;
        Ok(page.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_segments() {
        assert_eq!(
            build_url("https://api.openai.com/v1/", "/threads/t1/runs"),
            "https://api.openai.com/v1/threads/t1/runs"
        );
    }

    #[test]
    fn test_decode_reports_path() {
        let err = decode::<Run>(r#"{"id": "run_1", "thread_id": 7, "status": "queued"}"#, "runs")
            .unwrap_err();
        assert!(err.to_string().contains("thread_id"));
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let client = AssistantsClient::new(None);
        let err = client.create_thread().await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
