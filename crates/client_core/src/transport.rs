//! Seam between the orchestrator and the prediction service.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{PredictRequest, PredictResponse};
use tracing::debug;

use crate::error::TransportError;

#[async_trait]
pub trait PredictionTransport: Send + Sync {
    /// Performs one round trip. Any response the service actually sent comes
    /// back as `Ok`, whatever its status; only the absence of a usable body is
    /// an error.
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::TimedOut {
                endpoint: self.endpoint.clone(),
            }
        } else {
            TransportError::Unreachable {
                endpoint: self.endpoint.clone(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl PredictionTransport for HttpTransport {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, TransportError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.request_error(err))?;
        debug!(
            endpoint = %self.endpoint,
            status = status.as_u16(),
            bytes = body.len(),
            "prediction response received"
        );

        serde_json::from_slice::<PredictResponse>(&body).map_err(|err| {
            TransportError::MalformedBody {
                status: status.as_u16(),
                reason: err.to_string(),
            }
        })
    }
}
