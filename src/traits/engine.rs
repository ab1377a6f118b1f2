use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Outcome of one call to the workflow engine.
///
/// Connectivity failures are data, not errors: every lifecycle operation
/// must stay callable while the engine is flapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EngineReply {
    /// 2xx response; body as returned (non-JSON bodies become strings)
    Accepted { body: Value },
    /// Non-success response, relayed verbatim
    Rejected { status: u16, body: Value },
    /// The request never got a response
    Unreachable { reason: String },
}

impl EngineReply {
    pub fn unreachable(reason: impl Into<String>) -> Self {
        EngineReply::Unreachable {
            reason: reason.into(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, EngineReply::Accepted { .. })
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, EngineReply::Unreachable { .. })
    }

    /// Response body, if the engine answered at all.
    pub fn body(&self) -> Option<&Value> {
        match self {
            EngineReply::Accepted { body } | EngineReply::Rejected { body, .. } => Some(body),
            EngineReply::Unreachable { .. } => None,
        }
    }
}

/// The workflow engine's namespace-scoped API.
///
/// Implementations never fail: transport problems come back as
/// [`EngineReply::Unreachable`].
#[async_trait]
pub trait WorkflowEngine: Send + Sync {
    /// Submit a workflow for creation in `namespace`. `submission` is the
    /// already encoded `WorkflowSubmission` envelope.
    async fn create(&self, namespace: &str, submission: &Value) -> EngineReply;

    /// List the workflows in `namespace`.
    async fn list(&self, namespace: &str) -> EngineReply;

    /// Terminate the named workflow in `namespace`.
    async fn terminate(&self, namespace: &str, workflow: &str) -> EngineReply;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replies_serialize_with_outcome_tag() {
        let accepted = EngineReply::Accepted {
            body: json!({"items": []}),
        };
        assert_eq!(
            serde_json::to_value(&accepted).unwrap(),
            json!({"outcome": "accepted", "body": {"items": []}})
        );

        let unreachable = EngineReply::unreachable("connection refused");
        assert_eq!(
            serde_json::to_value(&unreachable).unwrap(),
            json!({"outcome": "unreachable", "reason": "connection refused"})
        );
        assert!(unreachable.is_unreachable());
        assert!(unreachable.body().is_none());
    }

    #[test]
    fn rejected_keeps_status_and_body() {
        let rejected = EngineReply::Rejected {
            status: 409,
            body: json!({"message": "already exists"}),
        };
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.body(), Some(&json!({"message": "already exists"})));
    }
}
