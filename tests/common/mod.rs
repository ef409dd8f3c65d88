#![allow(dead_code)]

use async_trait::async_trait;
use news_summarizer::{
    assistants::{
        Assistant, AssistantDefinition, AssistantsApi, Message, MessageRole, Run, RunStep, Thread,
        ToolOutput,
    },
    AgentError, Result,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;

/// In-memory assistants service that replays a scripted sequence of run states
#[derive(Debug, Default)]
pub struct ScriptedApi {
    runs: Mutex<VecDeque<Run>>,
    calls: Mutex<Vec<String>>,
    submissions: Mutex<Vec<(String, String, Vec<ToolOutput>)>>,
    posted: Mutex<Vec<(MessageRole, String)>>,
    final_text: String,
}

impl ScriptedApi {
    /// `runs` are returned in order by `retrieve_run`; the last one repeats
    pub fn new(runs: Vec<Run>, final_text: &str) -> Self {
        Self {
            runs: Mutex::new(runs.into()),
            final_text: final_text.to_string(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn submissions(&self) -> Vec<(String, String, Vec<ToolOutput>)> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<(MessageRole, String)> {
        self.posted.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl AssistantsApi for ScriptedApi {
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.record("retrieve_assistant");
        Ok(assistant(assistant_id))
    }

    async fn create_assistant(&self, definition: &AssistantDefinition) -> Result<Assistant> {
        self.record("create_assistant");
        let mut created = assistant("asst_new");
        created.name = Some(definition.name.clone());
        Ok(created)
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        self.record("retrieve_thread");
        Ok(Thread {
            id: thread_id.to_string(),
        })
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.record("create_thread");
        Ok(Thread {
            id: "thread_new".to_string(),
        })
    }

    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<Message> {
        self.record("create_message");
        self.posted.lock().unwrap().push((role, content.to_string()));
        Ok(message("msg_user", role, content, thread_id))
    }

    async fn create_run(
        &self,
        thread_id: &str,
        _assistant_id: &str,
        _instructions: &str,
    ) -> Result<Run> {
        self.record("create_run");
        Ok(run(thread_id, "queued", None))
    }

    async fn retrieve_run(&self, _thread_id: &str, _run_id: &str) -> Result<Run> {
        self.record("retrieve_run");
        let mut runs = self.runs.lock().unwrap();
        if runs.len() > 1 {
            Ok(runs.pop_front().unwrap())
        } else {
            runs.front()
                .cloned()
                .ok_or_else(|| AgentError::Unknown("no scripted run".to_string()))
        }
    }

    async fn list_run_steps(&self, _thread_id: &str, _run_id: &str) -> Result<Vec<RunStep>> {
        self.record("list_run_steps");
        Ok(vec![serde_json::from_value(json!({
            "id": "step_1",
            "type": "message_creation",
            "status": "completed",
            "step_details": {"message_creation": {"message_id": "msg_final"}}
        }))
        .unwrap()])
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: &[ToolOutput],
    ) -> Result<Run> {
        self.record("submit_tool_outputs");
        self.submissions.lock().unwrap().push((
            thread_id.to_string(),
            run_id.to_string(),
            tool_outputs.to_vec(),
        ));
        Ok(run(thread_id, "queued", None))
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<Message>> {
        self.record("list_messages");
        Ok(vec![
            message("msg_final", MessageRole::Assistant, &self.final_text, thread_id),
            message("msg_user", MessageRole::User, "earlier", thread_id),
        ])
    }
}

pub fn assistant(id: &str) -> Assistant {
    serde_json::from_value(json!({"id": id, "object": "assistant"})).unwrap()
}

pub fn message(id: &str, role: MessageRole, text: &str, thread_id: &str) -> Message {
    serde_json::from_value(json!({
        "id": id,
        "object": "thread.message",
        "thread_id": thread_id,
        "role": role,
        "content": [{"type": "text", "text": {"value": text, "annotations": []}}]
    }))
    .unwrap()
}

pub fn run(thread_id: &str, status: &str, required_action: Option<Value>) -> Run {
    serde_json::from_value(json!({
        "id": "run_1",
        "object": "thread.run",
        "thread_id": thread_id,
        "assistant_id": "asst_1",
        "status": status,
        "required_action": required_action,
    }))
    .unwrap()
}

pub fn status(status: &str) -> Run {
    run("thread_1", status, None)
}

/// A run blocked on the given `(call id, function name, arguments)` calls
pub fn requires_action(calls: &[(&str, &str, Value)]) -> Run {
    let tool_calls: Vec<Value> = calls
        .iter()
        .map(|(id, name, arguments)| {
            json!({
                "id": id,
                "type": "function",
                "function": {"name": name, "arguments": arguments.to_string()}
            })
        })
        .collect();
    run(
        "thread_1",
        "requires_action",
        Some(json!({
            "type": "submit_tool_outputs",
            "submit_tool_outputs": {"tool_calls": tool_calls}
        })),
    )
}

pub fn articles_body(articles: Value) -> String {
    json!({
        "status": "ok",
        "totalResults": articles.as_array().map(|a| a.len()).unwrap_or(0),
        "articles": articles
    })
    .to_string()
}
