//! Mock extraction collaborators for tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use firlens_core::{AgentResolver, AgentResult, ExtractionAgent};

enum MockBehavior {
    Payload(Option<Value>),
    Failure(String),
}

/// A mock extraction agent with canned payloads and a call counter.
pub struct MockAgent {
    name: String,
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: MockBehavior::Payload(None),
            calls: AtomicUsize::new(0),
        }
    }

    /// Respond with the given payload value.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.behavior = MockBehavior::Payload(Some(payload));
        self
    }

    /// Fail every extraction with the given message.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.behavior = MockBehavior::Failure(message.into());
        self
    }

    /// How many times `extract` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionAgent for MockAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn extract(&self, _path: &Path) -> Result<AgentResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Payload(data) => Ok(AgentResult { data: data.clone() }),
            MockBehavior::Failure(message) => bail!("{message}"),
        }
    }
}

/// A mock resolver backed by a name → agent map.
#[derive(Default)]
pub struct MockResolver {
    agents: HashMap<String, Arc<MockAgent>>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, agent: Arc<MockAgent>) -> Self {
        self.agents.insert(agent.name().to_string(), agent);
        self
    }
}

#[async_trait]
impl AgentResolver for MockResolver {
    async fn resolve(&self, name: &str) -> Result<Option<Arc<dyn ExtractionAgent>>> {
        Ok(self
            .agents
            .get(name)
            .cloned()
            .map(|agent| agent as Arc<dyn ExtractionAgent>))
    }
}
