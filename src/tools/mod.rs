//! Tools the assistant can call and the dispatcher that resolves them

pub mod dispatcher;
pub mod news;
pub mod tool;
pub(crate) mod validation;

pub use dispatcher::{ToolDispatcher, ToolRequest};
pub use news::GetNewsParams;
pub use tool::{openai_tools, ToolKind};
