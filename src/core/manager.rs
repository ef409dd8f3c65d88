use super::definition::{news_summarizer_definition, topic_prompt, RUN_INSTRUCTIONS};
use super::tracker::{Advance, RunTracker};
use crate::{
    assistants::{AssistantDefinition, AssistantsApi, AssistantsClient, MessageRole, RunStep},
    config::{Settings, DEFAULT_MODEL, DEFAULT_POLL_INTERVAL},
    error::{AgentError, Result},
    tools::ToolDispatcher,
    types::Digest,
};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Identifiers of remote objects to reuse across runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionIds {
    pub assistant_id: Option<String>,
    pub thread_id: Option<String>,
}

impl SessionIds {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            assistant_id: settings.assistant_id.clone(),
            thread_id: settings.thread_id.clone(),
        }
    }
}

/// Owns the assistant, the thread and at most one run at a time.
///
/// All state changes go through `&mut self`, so a single manager never races
/// itself when creating the assistant or thread.
#[derive(Debug)]
pub struct RunManager<A> {
    api: A,
    dispatcher: ToolDispatcher,
    model: String,
    session: SessionIds,
    poll_interval: Duration,
    poll_timeout: Option<Duration>,
    run: Option<RunTracker>,
    summary: Option<String>,
}

impl RunManager<AssistantsClient> {
    /// Build a manager backed by the HTTP client
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            AssistantsClient::from_settings(settings),
            ToolDispatcher::from_settings(settings),
        )
        .with_model(settings.model.clone())
        .with_session(SessionIds::from_settings(settings))
        .with_poll_interval(settings.poll_interval)
        .with_poll_timeout(settings.poll_timeout)
    }
}

impl<A: AssistantsApi> RunManager<A> {
    pub fn new(api: A, dispatcher: ToolDispatcher) -> Self {
        Self {
            api,
            dispatcher,
            model: DEFAULT_MODEL.to_string(),
            session: SessionIds::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: None,
            run: None,
            summary: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_session(mut self, session: SessionIds) -> Self {
        self.session = session;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.poll_timeout = timeout;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &SessionIds {
        &self.session
    }

    pub fn current_run(&self) -> Option<&RunTracker> {
        self.run.as_ref()
    }

    /// Reuse the configured assistant if there is one, otherwise create it once
    /// and remember its id.
    pub async fn ensure_assistant(&mut self, definition: &AssistantDefinition) -> Result<String> {
        if let Some(assistant_id) = self.session.assistant_id.clone() {
            let assistant = self.api.retrieve_assistant(&assistant_id).await?;
            return Ok(assistant.id);
        }

        let assistant = self.api.create_assistant(definition).await?;
        info!("Created assistant {}", assistant.id);
        self.session.assistant_id = Some(assistant.id.clone());
        Ok(assistant.id)
    }

    /// Reuse the configured thread if there is one, otherwise create it once
    pub async fn ensure_thread(&mut self) -> Result<String> {
        if let Some(thread_id) = self.session.thread_id.clone() {
            let thread = self.api.retrieve_thread(&thread_id).await?;
            return Ok(thread.id);
        }

        let thread = self.api.create_thread().await?;
        info!("Created thread {}", thread.id);
        self.session.thread_id = Some(thread.id.clone());
        Ok(thread.id)
    }

    pub async fn ensure_context(&mut self, definition: &AssistantDefinition) -> Result<()> {
        self.ensure_assistant(definition).await?;
        self.ensure_thread().await?;
        Ok(())
    }

    /// Append a message to the thread. If the previous run has not reached a
    /// terminal state yet, it is polled to completion first.
    pub async fn post_message(
        &mut self,
        role: MessageRole,
        content: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let thread_id = self.thread_id()?;

        if self.run.as_ref().is_some_and(|run| !run.is_terminal()) {
            info!("Waiting for the active run to complete...");
            self.poll_until_terminal(cancel).await?;
        }

        self.api.create_message(&thread_id, role, content).await?;
        Ok(())
    }

    /// Start a run of the assistant on the thread
    pub async fn start_run(&mut self, instructions: &str) -> Result<String> {
        let thread_id = self.thread_id()?;
        let assistant_id = self.session.assistant_id.clone().ok_or_else(|| {
            AgentError::NoContext("assistant has not been created or retrieved".to_string())
        })?;

        if let Some(active) = self.run.as_ref().filter(|run| !run.is_terminal()) {
            return Err(AgentError::RunActive(active.run_id().to_string()));
        }

        let run = self
            .api
            .create_run(&thread_id, &assistant_id, instructions)
            .await?;
        info!("Started run {} ({})", run.id, run.status);

        let run_id = run.id.clone();
        self.run = Some(RunTracker::new(run.thread_id, run.id, run.status));
        Ok(run_id)
    }

    /// Poll the current run until it reaches a terminal status, resolving tool
    /// calls along the way. Sleeps `poll_interval` before every read.
    pub async fn poll_until_terminal(&mut self, cancel: &CancellationToken) -> Result<String> {
        let tracker = self
            .run
            .as_mut()
            .ok_or_else(|| AgentError::NoContext("no run has been started".to_string()))?;

        let poll = drive(
            tracker,
            &self.api,
            &self.dispatcher,
            self.poll_interval,
            cancel,
        );

        let text = match self.poll_timeout {
            Some(limit) => tokio::time::timeout(limit, poll).await.map_err(|_| {
                AgentError::Timeout(format!(
                    "run did not reach a terminal status within {:.1}s",
                    limit.as_secs_f64()
                ))
            })??,
            None => poll.await?,
        };

        self.summary = Some(text.clone());
        Ok(text)
    }

    /// The last extracted run result, if any run has completed
    pub fn get_result(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Execution trace of the current run
    pub async fn run_steps(&self) -> Result<Vec<RunStep>> {
        let run = self
            .run
            .as_ref()
            .ok_or_else(|| AgentError::NoContext("no run has been started".to_string()))?;
        self.api.list_run_steps(run.thread_id(), run.run_id()).await
    }

    /// Ask the assistant to summarize the news on `topic`
    pub async fn summarize(&mut self, topic: &str, cancel: &CancellationToken) -> Result<Digest> {
        let started = Instant::now();
        let definition = news_summarizer_definition(self.model.clone());

        self.ensure_context(&definition).await?;
        self.post_message(MessageRole::User, &topic_prompt(topic), cancel)
            .await?;
        self.start_run(RUN_INSTRUCTIONS).await?;
        let summary = self.poll_until_terminal(cancel).await?;
        let steps = self.run_steps().await?;

        let (thread_id, run_id, tool_submissions) = match self.run.as_ref() {
            Some(run) => (
                run.thread_id().to_string(),
                run.run_id().to_string(),
                run.submissions(),
            ),
            None => return Err(AgentError::NoContext("run disappeared".to_string())),
        };

        Ok(Digest {
            topic: topic.to_string(),
            summary,
            thread_id,
            run_id,
            steps,
            tool_submissions,
            duration: started.elapsed(),
        })
    }

    fn thread_id(&self) -> Result<String> {
        self.session.thread_id.clone().ok_or_else(|| {
            AgentError::NoContext("thread has not been created or retrieved".to_string())
        })
    }
}

async fn drive<A: AssistantsApi>(
    tracker: &mut RunTracker,
    api: &A,
    dispatcher: &ToolDispatcher,
    interval: Duration,
    cancel: &CancellationToken,
) -> Result<String> {
    loop {
        if let Some(text) = tracker.result() {
            return Ok(text.to_string());
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(AgentError::Cancelled),
            _ = tokio::time::sleep(interval) => {}
        }

        match tracker.advance(api, dispatcher).await? {
            Advance::Completed(text) => return Ok(text),
            Advance::Pending(_) | Advance::ToolOutputsSubmitted(_) => {}
        }
    }
}
