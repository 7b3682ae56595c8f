use std::path::PathBuf;

use log::{error, info, warn};

use crate::encoder::FeatureVector;
use crate::model::{artifact, JsonForestLoader, ModelError, ModelLoader};

use super::assets::InlineImage;
use super::error::PredictionError;

/// Where the adapter finds its model and decorative assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    pub model_path: PathBuf,
    pub approval_asset: PathBuf,
    pub rejection_asset: PathBuf,
    /// Expected SHA-256 of the model file. Checked before every load when set.
    pub model_sha256: Option<String>,
}

/// The two labels the model is trained to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
}

impl Verdict {
    /// Maps a model label to a verdict. Only 0 and 1 have one.
    pub fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Self::Rejected),
            1 => Some(Self::Approved),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Approved => "Congratulations!! You will get the loan from the bank.",
            Self::Rejected => "According to our calculations, you will not get the loan from the bank.",
        }
    }

    pub fn alt_text(self) -> &'static str {
        match self {
            Self::Approved => "Yes gif",
            Self::Rejected => "No gif",
        }
    }
}

/// What gets shown after a successful prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionOutcome {
    pub verdict: Verdict,
    pub image: InlineImage,
}

impl PredictionOutcome {
    pub fn message(&self) -> &'static str {
        self.verdict.message()
    }

    pub fn is_approved(&self) -> bool {
        self.verdict == Verdict::Approved
    }

    pub fn to_html(&self) -> String {
        self.image.to_html()
    }
}

/// Runs one prediction end to end: read assets, load the model, predict, pick
/// the outcome. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct PredictorAdapter<L = JsonForestLoader> {
    config: PredictorConfig,
    loader: L,
}

impl PredictorAdapter<JsonForestLoader> {
    pub fn new(config: PredictorConfig) -> Self {
        Self::with_loader(config, JsonForestLoader)
    }
}

impl<L: ModelLoader> PredictorAdapter<L> {
    pub fn with_loader(config: PredictorConfig, loader: L) -> Self {
        Self { config, loader }
    }

    /// Predicts for one encoded application.
    ///
    /// Returns `Ok(None)` when the model answers with a label other than 0 or
    /// 1: there is nothing to show for it and it is not treated as a failure.
    pub fn predict(&self, features: &FeatureVector) -> Result<Option<PredictionOutcome>, PredictionError> {
        self.run(features).map_err(|e| {
            error!("{}", e);
            e
        })
    }

    fn run(&self, features: &FeatureVector) -> Result<Option<PredictionOutcome>, PredictionError> {
        let approval = InlineImage::load(&self.config.approval_asset, Verdict::Approved.alt_text())?;
        let rejection = InlineImage::load(&self.config.rejection_asset, Verdict::Rejected.alt_text())?;

        if let Some(expected) = &self.config.model_sha256 {
            artifact::ensure_verified(&self.config.model_path, expected)?;
        }
        let model = self.loader.load(&self.config.model_path)?;

        let labels = model.predict(features.to_sample().view())?;
        let label = *labels
            .first()
            .ok_or_else(|| ModelError::Prediction("Model returned no label".into()))?;
        info!("Model predicted label {} for {}", label, features);

        let outcome = match Verdict::from_label(label) {
            Some(Verdict::Approved) => PredictionOutcome {
                verdict: Verdict::Approved,
                image: approval,
            },
            Some(Verdict::Rejected) => PredictionOutcome {
                verdict: Verdict::Rejected,
                image: rejection,
            },
            None => {
                warn!("Model returned unexpected label {}; nothing to render", label);
                return Ok(None);
            }
        };
        Ok(Some(outcome))
    }
}
