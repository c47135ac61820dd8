//! Client for the generation service.

use std::sync::OnceLock;

use bytes::Bytes;
use log::{debug, info, warn};
use regex::Regex;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::config::{ServiceConfig, DEFAULT_FILENAME};
use crate::error::GenerateError;
use crate::request::GenerationRequest;

/// Error body returned by the service on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// File returned by a successful generate call.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    config: ServiceConfig,
}

impl GenerationClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ServiceConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Send one generate request and collect the resulting file.
    ///
    /// No retries and no timeout: the call runs until the service answers or
    /// the connection fails.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedFile, GenerateError> {
        let url = self.config.generate_url();
        info!(
            "Requesting generation from {} (layers: {:?}, imagery: {})",
            url,
            request.layers,
            request.imagery.id()
        );

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty());
            return Err(server_error(status, message));
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let bytes = response.bytes().await?;
        debug!("Received {} ({} bytes)", filename, bytes.len());

        Ok(GeneratedFile { filename, bytes })
    }
}

fn server_error(status: StatusCode, message: Option<String>) -> GenerateError {
    match message {
        Some(message) => {
            warn!("Generation service returned {}: {}", status, message);
            GenerateError::Server { status, message }
        }
        None => {
            warn!("Generation service returned {} without an error message", status);
            GenerateError::MalformedResponse { status }
        }
    }
}

/// Pull the suggested filename off the end of a `Content-Disposition` value.
///
/// Accepts `filename="name"` and `filename=name`.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    static FILENAME: OnceLock<Regex> = OnceLock::new();
    let re = FILENAME.get_or_init(|| {
        Regex::new(r#"filename="?([^";]+)"?\s*$"#).expect("filename pattern is valid")
    });

    re.captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}
