//! Runtime settings sourced from the process environment.
//!
//! Secrets are optional at load time. A missing key only surfaces as
//! [`AgentError::Config`](crate::AgentError::Config) when the first request that
//! needs it is attempted.

use std::env;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-16k";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Settings shared by the news fetcher and the assistants client
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub openai_base_url: String,
    pub news_base_url: String,
    pub model: String,
    /// Previously created assistant to reuse instead of creating a new one
    pub assistant_id: Option<String>,
    /// Previously created thread to reuse instead of creating a new one
    pub thread_id: Option<String>,
    pub poll_interval: Duration,
    /// Upper bound on a single poll loop; `None` polls until a terminal status
    pub poll_timeout: Option<Duration>,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            news_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            assistant_id: None,
            thread_id: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl Settings {
    /// Read settings from the environment. Call `dotenvy::dotenv()` first to
    /// pick up a local `.env` file.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            news_api_key: non_empty_var("NEWS_API_KEY"),
            openai_base_url: non_empty_var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            news_base_url: non_empty_var("NEWS_API_BASE_URL").unwrap_or(defaults.news_base_url),
            model: non_empty_var("OPENAI_MODEL").unwrap_or(defaults.model),
            assistant_id: non_empty_var("ASSISTANT_ID"),
            thread_id: non_empty_var("THREAD_ID"),
            ..defaults
        }
    }

    pub fn with_openai_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.openai_api_key = Some(api_key.into());
        self
    }

    pub fn with_news_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.news_api_key = Some(api_key.into());
        self
    }

    pub fn with_openai_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.openai_base_url = base_url.into();
        self
    }

    pub fn with_news_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.news_base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_assistant_id(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = Some(assistant_id.into());
        self
    }

    pub fn with_thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.poll_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
