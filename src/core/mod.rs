pub mod definition;
pub mod manager;
pub mod tracker;

pub use definition::{news_summarizer_definition, topic_prompt};
pub use manager::{RunManager, SessionIds};
pub use tracker::{Advance, RunPhase, RunTracker};
