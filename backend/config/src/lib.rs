//! Environment-driven configuration for the FIRLens backend.
//!
//! Every knob has a default; only `LLAMA_CLOUD_API_KEY` must be provided
//! before the real cloud client can be constructed.

use std::collections::HashMap;

use serde::Deserialize;

/// FIRLens runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Scratch directory for staged uploads
    pub upload_dir: String,
    /// LlamaCloud API key
    pub llama_cloud_api_key: Option<String>,
    /// LlamaCloud API base URL
    pub llama_cloud_base_url: String,
    /// Name of the extraction agent provisioned on the cloud service
    pub agent_name: String,
    /// CORS allow-list
    pub allowed_origins: Vec<String>,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Optional directory for rolling JSON log files
    pub log_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8000,
            upload_dir: "temp_uploads".to_string(),
            llama_cloud_api_key: None,
            llama_cloud_base_url: "https://api.cloud.llamaindex.ai".to_string(),
            agent_name: "FIR_TextExtraction".to_string(),
            allowed_origins: default_origins(),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Settings {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_map(&std::env::vars().collect())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_map(env: &HashMap<String, String>) -> Self {
        let get = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            bind_address: get("FIRLENS_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("FIRLENS_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            upload_dir: get("FIRLENS_UPLOAD_DIR").unwrap_or_else(|| "temp_uploads".to_string()),
            llama_cloud_api_key: get("LLAMA_CLOUD_API_KEY"),
            llama_cloud_base_url: get("LLAMA_CLOUD_BASE_URL")
                .unwrap_or_else(|| "https://api.cloud.llamaindex.ai".to_string()),
            agent_name: get("FIR_AGENT_NAME").unwrap_or_else(|| "FIR_TextExtraction".to_string()),
            allowed_origins: get("FIRLENS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(default_origins),
            log_level: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_dir: get("FIRLENS_LOG_DIR"),
        }
    }
}
