use crate::news::NewsFetcher;
use serde::{Deserialize, Serialize};

/// Parameters for the `get_news` function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetNewsParams {
    /// The topic for the news, e.g., bitcoin.
    pub topic: String,
}

/// Fetch articles and join their text blocks with no separator. Article
/// boundaries are not preserved in the output.
pub async fn get_news(fetcher: &NewsFetcher, params: &GetNewsParams) -> String {
    fetcher
        .fetch_news(&params.topic)
        .await
        .iter()
        .map(|record| record.format_block())
        .collect()
}
