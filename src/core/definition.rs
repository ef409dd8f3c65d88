use crate::{assistants::AssistantDefinition, tools::openai_tools};

pub const ASSISTANT_NAME: &str = "News Summarizer";

pub const ASSISTANT_INSTRUCTIONS: &str = "You are a personal article summarizer Assistant who knows how to take a list of article titles and descriptions and then write a short summary of all the news articles.";

pub const RUN_INSTRUCTIONS: &str = "Summarize the news";

/// The assistant persona used by [`RunManager::summarize`](super::RunManager::summarize)
pub fn news_summarizer_definition(model: impl Into<String>) -> AssistantDefinition {
    AssistantDefinition {
        name: ASSISTANT_NAME.to_string(),
        instructions: ASSISTANT_INSTRUCTIONS.to_string(),
        model: model.into(),
        tools: openai_tools(),
    }
}

/// The user message posted for a topic
pub fn topic_prompt(topic: &str) -> String {
    format!("summarize the news on this topic {}", topic)
}
