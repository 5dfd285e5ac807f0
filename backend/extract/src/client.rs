//! LlamaCloud wire client.
//!
//! Resolves extraction agents by name and drives the extraction job flow:
//! upload the staged file, create one job against the agent, poll until it
//! settles, fetch the result payload. One call to
//! [`ExtractionAgent::extract`] creates exactly one billable job.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use firlens_core::{AgentResolver, AgentResult, ExtractionAgent};
use logging::redact_sensitive_data;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const POLL_DEADLINE: Duration = Duration::from_secs(600);

/// LlamaCloud extraction service client.
#[derive(Clone)]
pub struct LlamaCloudClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AgentDescriptor {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Serialize)]
struct CreateJobRequest<'a> {
    extraction_agent_id: &'a str,
    file_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractionJob {
    id: String,
    status: JobStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum JobStatus {
    Pending,
    Running,
    Success,
    Error,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct JobResult {
    data: Option<Value>,
}

impl LlamaCloudClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.cloud.llamaindex.ai".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn auth(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(REQUEST_TIMEOUT)
    }

    async fn check(response: Response, what: &str) -> Result<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("{what} returned {status}: {}", redact_sensitive_data(&body));
        }
        Ok(response)
    }

    async fn upload_file(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let form = Form::new().part("upload_file", Part::bytes(bytes).file_name(file_name));
        let response = self
            .auth(
                self.client
                    .post(format!("{}/api/v1/files", self.base_url))
                    .multipart(form),
            )
            .send()
            .await
            .context("file upload request failed")?;
        let response = Self::check(response, "file upload").await?;

        let uploaded: UploadedFile = response
            .json()
            .await
            .context("failed to parse file upload response")?;
        Ok(uploaded.id)
    }

    async fn create_job(&self, agent_id: &str, file_id: &str) -> Result<ExtractionJob> {
        let body = CreateJobRequest {
            extraction_agent_id: agent_id,
            file_id,
        };
        let response = self
            .auth(
                self.client
                    .post(format!("{}/api/v1/extraction/jobs", self.base_url))
                    .json(&body),
            )
            .send()
            .await
            .context("job creation request failed")?;
        let response = Self::check(response, "job creation").await?;

        response
            .json()
            .await
            .context("failed to parse job creation response")
    }

    async fn wait_for_job(&self, job_id: &str) -> Result<()> {
        let deadline = tokio::time::Instant::now() + POLL_DEADLINE;
        loop {
            let url = format!("{}/api/v1/extraction/jobs/{}", self.base_url, job_id);
            let response = self
                .auth(self.client.get(&url))
                .send()
                .await
                .context("job status request failed")?;
            let response = Self::check(response, "job status").await?;
            let job: ExtractionJob = response
                .json()
                .await
                .context("failed to parse job status")?;

            match job.status {
                JobStatus::Success => return Ok(()),
                JobStatus::Error => bail!("extraction job {} failed remotely", job.id),
                JobStatus::Cancelled => bail!("extraction job {} was cancelled", job.id),
                JobStatus::Pending | JobStatus::Running | JobStatus::Unknown => {}
            }

            if tokio::time::Instant::now() >= deadline {
                bail!(
                    "extraction job {} did not finish within {}s",
                    job.id,
                    POLL_DEADLINE.as_secs()
                );
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn job_result(&self, job_id: &str) -> Result<JobResult> {
        let url = format!("{}/api/v1/extraction/jobs/{}/result", self.base_url, job_id);
        let response = self
            .auth(self.client.get(&url))
            .send()
            .await
            .context("job result request failed")?;
        let response = Self::check(response, "job result").await?;

        response
            .json()
            .await
            .context("failed to parse job result")
    }
}

#[async_trait]
impl AgentResolver for LlamaCloudClient {
    async fn resolve(&self, name: &str) -> Result<Option<Arc<dyn ExtractionAgent>>> {
        let url = format!(
            "{}/api/v1/extraction/extraction-agents/by-name/{}",
            self.base_url, name
        );
        debug!(agent = name, "resolving extraction agent");

        let response = self
            .auth(self.client.get(&url))
            .send()
            .await
            .context("agent lookup request failed")?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response, "agent lookup").await?;

        let descriptor: AgentDescriptor = response
            .json()
            .await
            .context("failed to parse agent descriptor")?;
        Ok(Some(Arc::new(RemoteAgent {
            client: self.clone(),
            descriptor,
        })))
    }
}

/// A resolved agent on the cloud service.
struct RemoteAgent {
    client: LlamaCloudClient,
    descriptor: AgentDescriptor,
}

#[async_trait]
impl ExtractionAgent for RemoteAgent {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    async fn extract(&self, path: &Path) -> Result<AgentResult> {
        debug!(
            path = %path.display(),
            agent = %self.descriptor.name,
            "starting remote extraction"
        );

        let file_id = self.client.upload_file(path).await?;
        // The one billable call: a single job per extract() invocation.
        let job = self.client.create_job(&self.descriptor.id, &file_id).await?;
        self.client.wait_for_job(&job.id).await?;
        let result = self.client.job_result(&job.id).await?;

        Ok(AgentResult { data: result.data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_job_statuses() {
        let job: ExtractionJob =
            serde_json::from_str(r#"{"id": "j1", "status": "SUCCESS"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Success);

        let job: ExtractionJob =
            serde_json::from_str(r#"{"id": "j2", "status": "SOMETHING_NEW"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
    }

    #[test]
    fn parses_result_with_and_without_data() {
        let result: JobResult = serde_json::from_str(r#"{"data": {"k": 1}}"#).unwrap();
        assert!(result.data.is_some());

        let result: JobResult = serde_json::from_str(r#"{}"#).unwrap();
        assert!(result.data.is_none());
    }
}
