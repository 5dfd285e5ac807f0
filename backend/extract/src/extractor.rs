//! The Extraction Client.
//!
//! Orchestrates one extraction: local existence check, agent resolution,
//! a single remote call, payload normalization. Never retries — every
//! extraction call is billed by the cloud service.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use firlens_core::{AgentResolver, DocumentExtractor, ExtractedDocument, FirlensError};

use crate::normalize::normalize_payload;

/// Extracts structured FIR data through a named cloud agent.
pub struct FirExtractor {
    resolver: Arc<dyn AgentResolver>,
    agent_name: String,
}

impl FirExtractor {
    pub fn new(resolver: Arc<dyn AgentResolver>, agent_name: impl Into<String>) -> Self {
        Self {
            resolver,
            agent_name: agent_name.into(),
        }
    }

    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }
}

#[async_trait]
impl DocumentExtractor for FirExtractor {
    async fn extract(&self, path: &Path) -> Result<ExtractedDocument, FirlensError> {
        debug!(path = %path.display(), "starting extraction");

        if !path.exists() {
            return Err(FirlensError::NotFound(path.display().to_string()));
        }

        let agent = self
            .resolver
            .resolve(&self.agent_name)
            .await
            .map_err(|e| FirlensError::ExtractionFailed(e.to_string()))?
            .ok_or_else(|| FirlensError::AgentUnavailable(self.agent_name.clone()))?;

        info!(agent = %self.agent_name, "dispatching single extraction call");
        let result = agent
            .extract(path)
            .await
            .map_err(|e| FirlensError::ExtractionFailed(e.to_string()))?;

        normalize_payload(result)
    }
}
