use sitenav_core::mutation::BatchSubmission;
use thiserror::Error;
use tower_lsp::Client;

use crate::protocol::{SubmitBatch, SubmitBatchParams};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The endpoint answered but refused the batch
    #[error("batch rejected: {0}")]
    Rejected(String),
    /// The batch never reached the endpoint
    #[error("transport unavailable: {0}")]
    Unavailable(String),
}

/// Delivers a batched update to the content repository
#[tower_lsp::async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, batch: BatchSubmission) -> Result<(), TransportError>;
}

/// Hands the batch to the connected host, which performs the HTTP POST
pub struct ClientTransport {
    client: Client,
}

impl ClientTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[tower_lsp::async_trait]
impl Transport for ClientTransport {
    async fn submit(&self, batch: BatchSubmission) -> Result<(), TransportError> {
        let body = batch
            .to_form_body()
            .map_err(|e| TransportError::Rejected(e.to_string()))?;
        let params = SubmitBatchParams {
            endpoint: batch.endpoint.clone(),
            body,
            submission: batch,
        };

        let response = self
            .client
            .send_request::<SubmitBatch>(params)
            .await
            .map_err(|e| TransportError::Unavailable(e.message.to_string()))?;

        if (200..300).contains(&response.status) {
            Ok(())
        } else {
            Err(TransportError::Rejected(format!(
                "endpoint returned HTTP {}",
                response.status
            )))
        }
    }
}
