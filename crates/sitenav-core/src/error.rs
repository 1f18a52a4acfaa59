use thiserror::Error;

use crate::model::{PageKey, PathPrefix};

/// Errors and non-fatal diagnostics raised by the core
#[derive(Debug, Error)]
pub enum NavError {
    #[error("malformed page record '{key}': {reason}")]
    MalformedRecord { key: PageKey, reason: String },

    #[error("unknown page '{0}'")]
    UnknownPage(PageKey),

    #[error("'{child}' cannot be placed under '{parent}': it is already an ancestor")]
    CycleDetected { parent: PathPrefix, child: PathPrefix },

    #[error("'{child}' already has parent '{existing}', ignoring '{parent}'")]
    ConflictingParent {
        child: PathPrefix,
        existing: PathPrefix,
        parent: PathPrefix,
    },

    #[error("invalid move: {0}")]
    InvalidMove(String),

    #[error("reference page '{0}' has no numeric position")]
    UnpositionedReference(PageKey),

    #[error("listing is not a JSON object")]
    InvalidListing,

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("listing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
