use super::types::{
    Assistant, AssistantDefinition, Message, MessageRole, Run, RunStep, Thread, ToolOutput,
};
use crate::error::Result;
use async_trait::async_trait;

/// Remote operations consumed from the assistants service
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    async fn create_assistant(&self, definition: &AssistantDefinition) -> Result<Assistant>;

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread>;

    async fn create_thread(&self) -> Result<Thread>;

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message>;

    async fn create_run(&self, thread_id: &str, assistant_id: &str, instructions: &str)
        -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>>;

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: &[ToolOutput],
    ) -> Result<Run>;

    /// Messages on the thread, newest first
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>>;
}
