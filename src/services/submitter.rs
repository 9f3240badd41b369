use crate::{
    config::GenerationConfig,
    error::TransportError,
    models::generation::{RawSubmitResponse, SubmitPayload, SubmitResponse},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Url,
};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Remote side of a generation request: one JSON POST, one JSON answer.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitResponse, TransportError>;
}

/// Submits jobs to the configured HTTP endpoint.
///
/// Only the connect phase has a client-side timeout; the overall bound is
/// enforced by the controller, which drops (and so aborts) the request.
pub struct HttpJobSubmitter {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl HttpJobSubmitter {
    pub fn new(config: &GenerationConfig) -> Result<Self, TransportError> {
        let endpoint = Url::parse(&config.endpoint_url).map_err(|e| {
            TransportError::Network(format!(
                "Invalid endpoint URL {}: {}",
                config.endpoint_url, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(ref name) = config.client_name {
            headers.insert("x-client-name", header_value(name)?);
        }
        if let Some(ref version) = config.client_version {
            headers.insert("x-client-version", header_value(version)?);
        }

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn header_value(value: &str) -> Result<HeaderValue, TransportError> {
    HeaderValue::from_str(value)
        .map_err(|e| TransportError::Network(format!("Invalid header value {:?}: {}", value, e)))
}

#[async_trait]
impl JobSubmitter for HttpJobSubmitter {
    #[instrument(skip(self, payload), fields(style = %payload.style, length = payload.length))]
    async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitResponse, TransportError> {
        let start = Instant::now();

        // .json() sets Content-Type: application/json
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("Generation request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to read response body: {}", e)))?;

        debug!(
            status = status.as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            body_len = body.len(),
            "Generation endpoint responded"
        );

        if !status.is_success() {
            let detail = String::from_utf8_lossy(&body).trim().to_string();
            warn!(status = status.as_u16(), "Generation endpoint error: {}", detail);
            return Err(TransportError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let raw: RawSubmitResponse = serde_json::from_slice(&body).map_err(|e| {
            TransportError::Malformed(format!("Failed to parse generation response: {}", e))
        })?;

        let response = SubmitResponse::try_from(raw)?;
        if let SubmitResponse::Accepted {
            ref job_id,
            ref metadata,
        } = response
        {
            info!(
                job_id = %job_id,
                metadata = %serde_json::Value::Object(metadata.clone()),
                "Generation job queued"
            );
        }

        Ok(response)
    }
}
