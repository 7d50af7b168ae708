//! Error type for transformation.

use thiserror::Error;
use vitals_ingest::IngestError;
use vitals_model::ModelError;

#[derive(Debug, Error)]
pub enum TransformError {
    /// Source discovery failed before any folder could be processed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Model(#[from] ModelError),

    /// No source folder contributed any rows.
    #[error("no data to consolidate")]
    NoData,
}

pub type Result<T> = std::result::Result<T, TransformError>;
