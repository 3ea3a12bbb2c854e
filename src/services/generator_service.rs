//! Domain service for credential batch generation and batch export.

use serde::Serialize;
use thiserror::Error;

use crate::domain::{BatchHandle, Identity};
use crate::export::{ExportError, ExportFile, ExportFormat};
use crate::generator::{BatchMetadata, CredentialRecord, GenerateError, GenerateRequest};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Validation(#[from] GenerateError),

    #[error("Batch not found or expired; generate it again")]
    BatchNotFound,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for GeneratorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Result of one generation call.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedBatch {
    /// Pass back to the export endpoint to download this batch.
    pub handle: BatchHandle,
    pub records: Vec<CredentialRecord>,
    pub commands: Vec<String>,
    pub commands_text: String,
    pub metadata: BatchMetadata,
}

#[async_trait::async_trait]
pub trait GeneratorService: Send + Sync {
    /// Generates a batch, records the activity and parks the batch for export.
    ///
    /// # Errors
    ///
    /// - [`GeneratorError::Validation`] when the request is rejected; nothing is
    ///   recorded or parked in that case
    /// - [`GeneratorError::Internal`] when the activity cannot be persisted
    async fn generate(
        &self,
        identity: &Identity,
        request: GenerateRequest,
    ) -> Result<GeneratedBatch, GeneratorError>;

    /// Renders the caller's parked batch.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::BatchNotFound`] when the handle is unknown,
    /// belongs to someone else, was replaced by a newer batch, or expired.
    async fn export_batch(
        &self,
        identity: &Identity,
        handle: BatchHandle,
        format: ExportFormat,
    ) -> Result<ExportFile, GeneratorError>;
}
