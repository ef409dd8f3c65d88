use crate::{
    assistants::{AssistantsApi, Message, RunError, RunStatus},
    error::{AgentError, Result},
    tools::ToolDispatcher,
};
use tracing::{debug, info};

/// Where a tracked run stands from this side of the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Queued, in progress, or waiting on tool outputs
    Active,
    Completed,
    Failed(RunStatus),
}

/// Outcome of a single [`RunTracker::advance`] step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// No side effect; the run is still queued or in progress
    Pending(RunStatus),
    /// Tool outputs were produced and submitted; the run will resume remotely
    ToolOutputsSubmitted(usize),
    /// The run finished and this is the newest message text
    Completed(String),
}

/// State machine for one remote run. Each `advance` reads the status once and
/// performs at most one side effect.
#[derive(Debug, Clone)]
pub struct RunTracker {
    thread_id: String,
    run_id: String,
    phase: RunPhase,
    last_status: RunStatus,
    last_error: Option<RunError>,
    result: Option<String>,
    submissions: usize,
}

impl RunTracker {
    pub fn new(thread_id: impl Into<String>, run_id: impl Into<String>, status: RunStatus) -> Self {
        Self {
            thread_id: thread_id.into(),
            run_id: run_id.into(),
            phase: RunPhase::Active,
            last_status: status,
            last_error: None,
            result: None,
            submissions: 0,
        }
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn last_status(&self) -> RunStatus {
        self.last_status
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.phase, RunPhase::Active)
    }

    /// Text extracted when the run completed
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Number of tool-output submissions made for this run
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Read the run status once and react to it. Once terminal, no further
    /// remote reads are made.
    pub async fn advance<A>(&mut self, api: &A, dispatcher: &ToolDispatcher) -> Result<Advance>
    where
        A: AssistantsApi + ?Sized,
    {
        match self.phase {
            RunPhase::Completed => {
                return Ok(Advance::Completed(self.result.clone().unwrap_or_default()))
            }
            RunPhase::Failed(status) => return Err(self.failure(status)),
            RunPhase::Active => {}
        }

        let run = api.retrieve_run(&self.thread_id, &self.run_id).await?;
        debug!(run_id = %run.id, status = %run.status, "Run status");

        if run.status != self.last_status {
            info!("Run {} status: {} -> {}", self.run_id, self.last_status, run.status);
            self.last_status = run.status;
        }

        match run.status {
            RunStatus::Completed => {
                let messages = api.list_messages(&self.thread_id).await?;
                let text = latest_text(&messages).ok_or_else(|| {
                    AgentError::Unknown(format!(
                        "Run {} completed but thread {} has no messages",
                        self.run_id, self.thread_id
                    ))
                })?;
                self.phase = RunPhase::Completed;
                self.result = Some(text.clone());
                Ok(Advance::Completed(text))
            }
            RunStatus::RequiresAction => {
                info!("Run {} requires tool outputs", self.run_id);
                let tool_outputs = dispatcher.dispatch(run.pending_tool_calls()).await?;
                api.submit_tool_outputs(&self.thread_id, &self.run_id, &tool_outputs)
                    .await?;
                self.submissions += 1;
                info!(
                    "Submitted {} tool output(s) to run {}",
                    tool_outputs.len(),
                    self.run_id
                );
                Ok(Advance::ToolOutputsSubmitted(tool_outputs.len()))
            }
            status if status.is_terminal() => {
                self.phase = RunPhase::Failed(status);
                self.last_error = run.last_error;
                Err(self.failure(status))
            }
            status => Ok(Advance::Pending(status)),
        }
    }

    fn failure(&self, status: RunStatus) -> AgentError {
        AgentError::RunFailed {
            run_id: self.run_id.clone(),
            status: status.to_string(),
            message: self
                .last_error
                .as_ref()
                .map(|error| format!("{}: {}", error.code, error.message))
                .unwrap_or_else(|| "no error details".to_string()),
        }
    }
}

/// Text of the newest message; messages are listed newest first
fn latest_text(messages: &[Message]) -> Option<String> {
    messages
        .first()
        .map(|message| message.first_text().unwrap_or_default().to_string())
}
