use crate::assistants::RunStep;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of summarizing one topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    pub topic: String,
    /// Text of the assistant's final message
    pub summary: String,
    pub thread_id: String,
    pub run_id: String,
    /// Remote execution trace of the run
    pub steps: Vec<RunStep>,
    /// Number of tool-output submissions made while polling
    pub tool_submissions: usize,
    pub duration: Duration,
}

impl Digest {
    /// Generate a human-readable trace of the run
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== News Summary Trace ===".to_string());
        lines.push(format!("Topic: {}", self.topic));
        lines.push(format!("Thread: {}", self.thread_id));
        lines.push(format!("Run: {}", self.run_id));
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Tool submissions: {}", self.tool_submissions));

        lines.push(String::new());
        lines.push("--- Run Steps ---".to_string());
        lines.push(self.steps_trace());

        lines.push(String::new());
        lines.push("--- Summary ---".to_string());
        lines.push(self.summary.clone());

        lines.join("\n")
    }

    /// Numbered list of the run's steps
    pub fn steps_trace(&self) -> String {
        if self.steps.is_empty() {
            return "(no steps reported)".to_string();
        }
        self.steps
            .iter()
            .enumerate()
            .map(|(idx, step)| format!("{}. {}", idx + 1, step.describe()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn used_tools(&self) -> bool {
        self.steps.iter().any(|step| step.kind == "tool_calls")
    }
}
