use crate::model::ModelError;

use super::assets::AssetError;

/// The one way a prediction can fail.
///
/// Every underlying cause (missing asset, unreadable or invalid model, failed
/// predict call) collapses into this type; only its description survives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("An error occurred: {detail}")]
pub struct PredictionError {
    detail: String,
}

impl PredictionError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }

    /// Description of the underlying failure.
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<AssetError> for PredictionError {
    fn from(err: AssetError) -> Self {
        Self::new(err.to_string())
    }
}
