use super::news::{get_news, GetNewsParams};
use super::tool::ToolKind;
use super::validation::{decode_arguments, validate_arguments};
use crate::{
    assistants::{ToolInvocation, ToolOutput},
    config::Settings,
    error::{AgentError, Result},
    news::NewsFetcher,
};
use serde_json::Value;
use tracing::info;

/// A pending invocation resolved to a supported tool with typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolRequest {
    GetNews(GetNewsParams),
}

impl ToolRequest {
    /// Resolve an invocation by exact function name and decode its arguments
    pub fn parse(invocation: &ToolInvocation) -> Result<Self> {
        let function_name = invocation.function.name.as_str();
        let kind = ToolKind::from_name(function_name)
            .ok_or_else(|| AgentError::ToolNotFound(function_name.to_string()))?;

        let arguments: Value = serde_json::from_str(&invocation.function.arguments).map_err(
            |err| {
                AgentError::InvalidFunctionCall(format!(
                    "Failed to parse arguments for tool '{}': {}",
                    function_name, err
                ))
            },
        )?;
        validate_arguments(kind, &arguments)?;

        match kind {
            ToolKind::GetNews => Ok(ToolRequest::GetNews(decode_arguments(kind, arguments)?)),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolRequest::GetNews(_) => ToolKind::GetNews,
        }
    }
}

/// Resolves the run's pending tool invocations to outputs
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    news: NewsFetcher,
}

impl ToolDispatcher {
    pub fn new(news: NewsFetcher) -> Self {
        Self { news }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(NewsFetcher::from_settings(settings))
    }

    /// Resolve a whole batch. Every invocation is parsed before any tool runs, so
    /// one unknown or malformed call fails the batch with no outputs produced.
    pub async fn dispatch(&self, invocations: &[ToolInvocation]) -> Result<Vec<ToolOutput>> {
        let requests = invocations
            .iter()
            .map(|invocation| ToolRequest::parse(invocation).map(|request| (invocation, request)))
            .collect::<Result<Vec<_>>>()?;

        let mut tool_outputs = Vec::with_capacity(requests.len());
        for (invocation, request) in requests {
            info!(
                target: "news_summarizer::tools",
                "🔧 Action: {}",
                invocation.describe()
            );
            let output = self.execute(&request).await;
            tool_outputs.push(ToolOutput {
                tool_call_id: invocation.id.clone(),
                output,
            });
        }

        Ok(tool_outputs)
    }

    /// Run one resolved request
    pub async fn execute(&self, request: &ToolRequest) -> String {
        match request {
            ToolRequest::GetNews(params) => get_news(&self.news, params).await,
        }
    }
}
