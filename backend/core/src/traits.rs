use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use crate::error::FirlensError;
use crate::types::ExtractedDocument;

/// Raw payload returned by a remote extraction agent, before normalization.
///
/// `data` mirrors the cloud service's result envelope: either a mapping
/// following the FIR schema, or JSON-encoded text representing one, or
/// nothing at all.
#[derive(Debug, Clone)]
pub struct AgentResult {
    pub data: Option<Value>,
}

/// A handle to a resolved remote extraction agent.
#[async_trait]
pub trait ExtractionAgent: Send + Sync {
    /// Agent name as registered with the cloud service.
    fn name(&self) -> &str;

    /// Run one extraction over the file at `path`.
    ///
    /// Implementations must make exactly one billable extraction call —
    /// every invocation is charged by the remote service.
    async fn extract(&self, path: &Path) -> Result<AgentResult>;
}

/// Resolves extraction agents by name against the cloud service.
#[async_trait]
pub trait AgentResolver: Send + Sync {
    /// Look up an agent; `Ok(None)` when the service knows no such agent.
    async fn resolve(&self, name: &str) -> Result<Option<Arc<dyn ExtractionAgent>>>;
}

/// The seam the HTTP layer consumes: one staged document in, one normalized
/// extraction result out.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<ExtractedDocument, FirlensError>;
}
