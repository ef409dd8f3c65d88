use super::record::{records_from_response, NewsRecord};
use crate::config::{Settings, DEFAULT_NEWS_BASE_URL};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

/// Maximum number of articles requested per search
pub const PAGE_SIZE: usize = 5;

/// Client for the news search API
#[derive(Debug, Clone)]
pub struct NewsFetcher {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl NewsFetcher {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: build_client(&Settings::default()),
            base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            client: build_client(settings),
            base_url: settings.news_base_url.clone(),
            api_key: settings.news_api_key.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search for articles on `topic`. Any failure is logged and degrades to an
    /// empty list so that the summary can still be produced.
    pub async fn fetch_news(&self, topic: &str) -> Vec<NewsRecord> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("NEWS_API_KEY is not set, returning no articles");
            return Vec::new();
        };

        let url = build_search_url(&self.base_url, topic, api_key);
        debug!(topic, "Fetching news");

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Error occurred during news API call: {}", err);
                return Vec::new();
            }
        };

        if response.status() != StatusCode::OK {
            warn!(
                "Failed to fetch news. Status code: {}",
                response.status().as_u16()
            );
            return Vec::new();
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Failed to decode news response: {}", err);
                return Vec::new();
            }
        };

        let mut records = records_from_response(&body);
        records.truncate(PAGE_SIZE);
        debug!(count = records.len(), "Fetched news articles");
        records
    }
}

/// The topic is interpolated as-is, without percent-encoding.
fn build_search_url(base_url: &str, topic: &str, api_key: &str) -> String {
    format!(
        "{}/everything?q={}&apiKey={}&pageSize={}",
        base_url.trim_end_matches('/'),
        topic,
        api_key,
        PAGE_SIZE
    )
}

fn build_client(settings: &Settings) -> Client {
    Client::builder()
        .timeout(settings.request_timeout)
        .build()
        .unwrap_or_else(|err| {
            warn!("Falling back to default HTTP client: {}", err);
            Client::new()
        })
}

impl Default for NewsFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}
