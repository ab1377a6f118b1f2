// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::Instrument;

use crate::config::consts::DEFAULT_WORKER_COUNT;
use crate::config::Config;
use crate::errors::ControllerError;
use crate::observability::messages::controller::{
    ProductStartRequested, ProductStopRequested, WorkflowItemSkipped, WorkflowSubmitted,
    WorkflowTerminated,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EngineReply, WorkflowEngine};
use crate::workflow::{GraphCompiler, GraphDocument, StepCatalog, WorkflowSubmission};

/// Knobs for a single start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartOptions {
    pub worker_count: u32,
    /// Ask the engine to validate without persisting
    pub dry_run: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKER_COUNT,
            dry_run: false,
        }
    }
}

/// What a start request sent and what the engine said about it.
#[derive(Debug, Clone, Serialize)]
pub struct StartOutcome {
    pub status: EngineReply,
    pub submission: WorkflowSubmission,
}

/// Engine reply for one terminate request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminateResult {
    pub workflow: String,
    pub reply: EngineReply,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StopOutcome {
    /// The listing succeeded; one entry per named workflow, in listing order
    Terminated { workflows: Vec<TerminateResult> },
    /// The listing itself was not accepted; nothing was terminated
    ListingFailed { listing: EngineReply },
}

impl StopOutcome {
    /// True when the listing worked and every terminate was accepted.
    pub fn is_clean(&self) -> bool {
        match self {
            StopOutcome::Terminated { workflows } => {
                workflows.iter().all(|w| w.reply.is_accepted())
            }
            StopOutcome::ListingFailed { .. } => false,
        }
    }
}

/// Summary of a status reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProductState {
    Running { workflows: Vec<Value> },
    Stopped,
    Unreachable { reason: String },
    Rejected { status: u16 },
}

impl ProductState {
    /// A missing or `null` item list counts as stopped, as does an empty one.
    pub fn from_reply(reply: &EngineReply) -> Self {
        match reply {
            EngineReply::Accepted { body } => match listed_items(body) {
                Some(items) if !items.is_empty() => ProductState::Running {
                    workflows: items.to_vec(),
                },
                _ => ProductState::Stopped,
            },
            EngineReply::Rejected { status, .. } => ProductState::Rejected { status: *status },
            EngineReply::Unreachable { reason } => ProductState::Unreachable {
                reason: reason.clone(),
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ProductState::Running { .. })
    }
}

fn listed_items(body: &Value) -> Option<&Vec<Value>> {
    body.get("items").and_then(Value::as_array)
}

fn workflow_name(item: &Value) -> Option<&str> {
    item.pointer("/metadata/name").and_then(Value::as_str)
}

/// Lifecycle for one product, bound to one namespace.
///
/// Holds no state of its own: every call re-derives the product's state from
/// the engine.
#[derive(Clone)]
pub struct ProductController {
    name: String,
    namespace: String,
    config: Arc<Config>,
    engine: Arc<dyn WorkflowEngine>,
}

impl ProductController {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        config: Arc<Config>,
        engine: Arc<dyn WorkflowEngine>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            config,
            engine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Build the workflow document for `worker_count` workers without
    /// submitting it.
    pub fn compile(&self, worker_count: u32) -> Result<GraphDocument, ControllerError> {
        let steps = StepCatalog::new(&self.config).steps(worker_count)?;
        let compiler = GraphCompiler::new(self.namespace.clone(), self.config.ttl_seconds);
        Ok(compiler.compile(&steps)?)
    }

    /// Compile and submit the product's workflow.
    ///
    /// Failing to compile or encode the submission is an error; anything the
    /// engine says comes back in [`StartOutcome::status`].
    ///
    /// There is no "already running" check; a second start is submitted as
    /// is and the engine decides.
    pub async fn start(&self, options: StartOptions) -> Result<StartOutcome, ControllerError> {
        let requested = ProductStartRequested {
            product: &self.name,
            namespace: &self.namespace,
            worker_count: options.worker_count,
            dry_run: options.dry_run,
        };
        let span = requested.span("start");
        requested.log();

        self.submit(options).instrument(span).await
    }

    async fn submit(&self, options: StartOptions) -> Result<StartOutcome, ControllerError> {
        let workflow = self.compile(options.worker_count)?;
        let submission = WorkflowSubmission {
            server_dry_run: options.dry_run,
            namespace: self.namespace.clone(),
            workflow,
        };

        let envelope = serde_json::to_value(&submission)?;
        let status = self.engine.create(&self.namespace, &envelope).await;
        WorkflowSubmitted {
            product: &self.name,
            workflow: &submission.workflow.metadata.name,
            accepted: status.is_accepted(),
        }
        .log();

        Ok(StartOutcome { status, submission })
    }

    /// The engine's workflow listing for this namespace, unmodified.
    pub async fn status(&self) -> EngineReply {
        self.engine.list(&self.namespace).await
    }

    pub async fn state(&self) -> ProductState {
        ProductState::from_reply(&self.status().await)
    }

    /// Terminate every workflow currently listed in the namespace.
    ///
    /// Terminates are issued one at a time in listing order, and every reply
    /// is kept whether or not it was accepted.
    pub async fn stop(&self) -> StopOutcome {
        let requested = ProductStopRequested {
            product: &self.name,
            namespace: &self.namespace,
        };
        let span = requested.span("stop");
        requested.log();

        self.terminate_listed().instrument(span).await
    }

    async fn terminate_listed(&self) -> StopOutcome {
        let body = match self.status().await {
            EngineReply::Accepted { body } => body,
            listing => return StopOutcome::ListingFailed { listing },
        };

        let mut workflows = Vec::new();
        for (position, item) in listed_items(&body).into_iter().flatten().enumerate() {
            let Some(workflow) = workflow_name(item) else {
                WorkflowItemSkipped {
                    namespace: &self.namespace,
                    position,
                }
                .log();
                continue;
            };

            let reply = self.engine.terminate(&self.namespace, workflow).await;
            WorkflowTerminated {
                namespace: &self.namespace,
                workflow,
                accepted: reply.is_accepted(),
            }
            .log();
            workflows.push(TerminateResult {
                workflow: workflow.to_string(),
                reply,
            });
        }

        StopOutcome::Terminated { workflows }
    }
}
