// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Url};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::Instrument;

use crate::config::EngineConfig;
use crate::errors::{ConfigError, ControllerError};
use crate::observability::messages::engine::{
    EngineRejected, EngineRequestSent, EngineUnreachable,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{EngineReply, WorkflowEngine};

const WORKFLOWS_PATH: [&str; 3] = ["api", "v1", "workflows"];

/// Workflow engine reached over its REST API.
#[derive(Debug, Clone)]
pub struct HttpWorkflowEngine {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpWorkflowEngine {
    /// Create a client for the engine at `base_url`.
    ///
    /// `token` is sent verbatim as the `Authorization` header. Without a
    /// `timeout` the transport's default applies.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ControllerError> {
        let invalid = |reason: String| ConfigError::InvalidEngineUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_string()).into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: parsed,
            token,
        })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, ControllerError> {
        Self::new(&config.url, config.token.clone(), config.timeout())
    }

    /// `{base}/api/v1/workflows/{namespace}/{tail..}`. Every segment is
    /// percent-encoded, `/` included.
    fn workflows_url(&self, namespace: &str, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only cannot-be-a-base urls refuse segments, and `new` rejects those
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(WORKFLOWS_PATH)
                .push(namespace)
                .extend(tail);
        }
        url
    }

    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> EngineReply {
        let sent = EngineRequestSent {
            method: method.as_str(),
            url: url.as_str(),
        };
        let span = sent.span("engine_request");
        sent.log();

        self.dispatch(method, url, body).instrument(span).await
    }

    async fn dispatch(&self, method: Method, url: Url, body: Option<Value>) -> EngineReply {
        let method_name = method.as_str().to_string();
        let url_text = url.to_string();
        let mut request: RequestBuilder = self.client.request(method, url);
        if let Some(token) = &self.token {
            request = request.header(header::AUTHORIZATION, token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return unreachable(&method_name, &url_text, e),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return unreachable(&method_name, &url_text, e),
        };
        let body = parse_body(text);

        if status.is_success() {
            EngineReply::Accepted { body }
        } else {
            EngineRejected {
                method: &method_name,
                url: &url_text,
                status: status.as_u16(),
            }
            .log();
            EngineReply::Rejected {
                status: status.as_u16(),
                body,
            }
        }
    }
}

fn unreachable(method: &str, url: &str, error: reqwest::Error) -> EngineReply {
    let reason = error.to_string();
    EngineUnreachable {
        method,
        url,
        reason: &reason,
    }
    .log();
    EngineReply::Unreachable { reason }
}

/// JSON when it parses, otherwise the raw text; empty bodies are null.
fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl WorkflowEngine for HttpWorkflowEngine {
    async fn create(&self, namespace: &str, submission: &Value) -> EngineReply {
        let url = self.workflows_url(namespace, &[]);
        self.send(Method::POST, url, Some(submission.clone())).await
    }

    async fn list(&self, namespace: &str) -> EngineReply {
        self.send(Method::GET, self.workflows_url(namespace, &[]), None)
            .await
    }

    async fn terminate(&self, namespace: &str, workflow: &str) -> EngineReply {
        let url = self.workflows_url(namespace, &[workflow, "terminate"]);
        let body = json!({ "name": workflow, "namespace": namespace });
        self.send(Method::PUT, url, Some(body)).await
    }
}
