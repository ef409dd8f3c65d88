//! news-summarizer: summarize recent news on a topic with an OpenAI assistant
//!
//! The assistant is given a single `get_news` function. When a run asks for it,
//! the crate searches the news API, hands the formatted articles back to the
//! run and keeps polling until the assistant has written its summary.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use news_summarizer::{RunManager, Settings};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dotenvy::dotenv().ok();
//!     let settings = Settings::from_env();
//!     let mut manager = RunManager::from_settings(&settings);
//!
//!     let digest = manager.summarize("bitcoin", &CancellationToken::new()).await?;
//!     println!("{}", digest.summary);
//!     Ok(())
//! }
//! ```

pub mod assistants;
pub mod config;
pub mod core;
pub mod error;
pub mod news;
pub mod tools;
pub mod types;

pub use assistants::{AssistantsApi, AssistantsClient, RunStatus, ToolInvocation, ToolOutput};
pub use config::Settings;
pub use core::{Advance, RunManager, RunPhase, RunTracker, SessionIds};
pub use error::{AgentError, Result};
pub use news::{NewsFetcher, NewsRecord};
pub use tools::{ToolDispatcher, ToolKind, ToolRequest};
pub use types::Digest;

#[cfg(feature = "cli")]
pub mod cli;
