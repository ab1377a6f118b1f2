// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Mutex;

use serde_json::{json, Value};

use crate::traits::{EngineReply, WorkflowEngine};

/// A call received by [`RecordingEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Create {
        namespace: String,
        submission: Value,
    },
    List {
        namespace: String,
    },
    Terminate {
        namespace: String,
        workflow: String,
    },
}

/// An in-memory engine for testing controllers without a server.
///
/// Create echoes the submitted envelope back, list answers with no items and
/// terminate answers with an empty object, unless a reply was scripted.
#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    create_reply: Option<EngineReply>,
    list_reply: Option<EngineReply>,
    terminate_reply: Option<EngineReply>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_reply(mut self, reply: EngineReply) -> Self {
        self.create_reply = Some(reply);
        self
    }

    pub fn with_list_reply(mut self, reply: EngineReply) -> Self {
        self.list_reply = Some(reply);
        self
    }

    /// List answers with these workflow names.
    pub fn with_workflows(self, names: &[&str]) -> Self {
        let items: Vec<Value> = names
            .iter()
            .map(|name| json!({ "metadata": { "name": name } }))
            .collect();
        self.with_list_reply(EngineReply::Accepted {
            body: json!({ "items": items }),
        })
    }

    pub fn with_terminate_reply(mut self, reply: EngineReply) -> Self {
        self.terminate_reply = Some(reply);
        self
    }

    /// An engine whose every call comes back unreachable.
    pub fn unreachable() -> Self {
        let reply = EngineReply::unreachable("connection refused");
        Self::new()
            .with_create_reply(reply.clone())
            .with_list_reply(reply.clone())
            .with_terminate_reply(reply)
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn record(&self, call: EngineCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

#[async_trait::async_trait]
impl WorkflowEngine for RecordingEngine {
    async fn create(&self, namespace: &str, submission: &Value) -> EngineReply {
        self.record(EngineCall::Create {
            namespace: namespace.to_string(),
            submission: submission.clone(),
        });
        match &self.create_reply {
            Some(reply) => reply.clone(),
            None => EngineReply::Accepted {
                body: submission.clone(),
            },
        }
    }

    async fn list(&self, namespace: &str) -> EngineReply {
        self.record(EngineCall::List {
            namespace: namespace.to_string(),
        });
        self.list_reply.clone().unwrap_or(EngineReply::Accepted {
            body: json!({ "items": null }),
        })
    }

    async fn terminate(&self, namespace: &str, workflow: &str) -> EngineReply {
        self.record(EngineCall::Terminate {
            namespace: namespace.to_string(),
            workflow: workflow.to_string(),
        });
        self.terminate_reply
            .clone()
            .unwrap_or(EngineReply::Accepted { body: json!({}) })
    }
}
