use thiserror::Error;

use crate::ENCODED_TEXT_LEN;

/// Why a stored round could not be turned back into a [`Round`](azulscore_core::Round).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Encoded round must be {expected} characters, got {len}", expected = ENCODED_TEXT_LEN)]
    InvalidLength { len: usize },
    #[error("Encoded round is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Round key {0:?} is not a round index")]
    InvalidRoundIndex(String),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
