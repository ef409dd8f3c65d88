//! Wire models and client for the remote assistants service

pub mod api;
pub mod client;
pub mod types;

pub use api::AssistantsApi;
pub use client::AssistantsClient;
pub use types::{
    Assistant, AssistantDefinition, FunctionCall, Message, MessageContent, MessageRole,
    RequiredAction, Run, RunError, RunStatus, RunStep, Thread, ToolInvocation, ToolOutput,
};
