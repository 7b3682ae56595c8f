use std::env;
use std::path::{Path, PathBuf};

use crate::predictor::PredictorConfig;

pub const HOME_ENV: &str = "LOANWISE_HOME";
pub const MODEL_ENV: &str = "LOANWISE_MODEL";
pub const MODEL_SHA256_ENV: &str = "LOANWISE_MODEL_SHA256";
pub const APPROVAL_ASSET_ENV: &str = "LOANWISE_APPROVAL_ASSET";
pub const REJECTION_ASSET_ENV: &str = "LOANWISE_REJECTION_ASSET";
pub const DATASET_ENV: &str = "LOANWISE_DATASET";

pub const DEFAULT_MODEL_FILE: &str = "Random_Forest.json";
pub const DEFAULT_APPROVAL_ASSET: &str = "6m-rain.gif";
pub const DEFAULT_REJECTION_ASSET: &str = "green-cola-no.gif";
pub const DEFAULT_DATASET_FILE: &str = "loan_dataset.csv";

/// File locations used by both pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub model_sha256: Option<String>,
    pub approval_asset: PathBuf,
    pub rejection_asset: PathBuf,
    pub dataset_path: PathBuf,
}

impl Default for AppConfig {
    /// The fixed file names, relative to the working directory.
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            model_sha256: None,
            approval_asset: PathBuf::from(DEFAULT_APPROVAL_ASSET),
            rejection_asset: PathBuf::from(DEFAULT_REJECTION_ASSET),
            dataset_path: PathBuf::from(DEFAULT_DATASET_FILE),
        }
    }
}

impl AppConfig {
    /// The fixed file names inside `base`.
    pub fn relative_to<P: AsRef<Path>>(base: P) -> Self {
        let base = base.as_ref();
        Self {
            model_path: base.join(DEFAULT_MODEL_FILE),
            model_sha256: None,
            approval_asset: base.join(DEFAULT_APPROVAL_ASSET),
            rejection_asset: base.join(DEFAULT_REJECTION_ASSET),
            dataset_path: base.join(DEFAULT_DATASET_FILE),
        }
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolution order:
    /// 1. Per-file variables (`LOANWISE_MODEL`, ...)
    /// 2. Default file names under `LOANWISE_HOME`
    /// 3. Default file names in the working directory
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = match lookup(HOME_ENV) {
            Some(home) => Self::relative_to(home),
            None => Self::default(),
        };
        if let Some(path) = lookup(MODEL_ENV) {
            config.model_path = PathBuf::from(path);
        }
        if let Some(hash) = lookup(MODEL_SHA256_ENV) {
            config.model_sha256 = Some(hash);
        }
        if let Some(path) = lookup(APPROVAL_ASSET_ENV) {
            config.approval_asset = PathBuf::from(path);
        }
        if let Some(path) = lookup(REJECTION_ASSET_ENV) {
            config.rejection_asset = PathBuf::from(path);
        }
        if let Some(path) = lookup(DATASET_ENV) {
            config.dataset_path = PathBuf::from(path);
        }
        config
    }

    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig {
            model_path: self.model_path.clone(),
            approval_asset: self.approval_asset.clone(),
            rejection_asset: self.rejection_asset.clone(),
            model_sha256: self.model_sha256.clone(),
        }
    }
}
