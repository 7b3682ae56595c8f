mod adapter;
mod assets;
mod error;

pub use adapter::{PredictionOutcome, PredictorAdapter, PredictorConfig, Verdict};
pub use assets::{AssetError, InlineImage};
pub use error::PredictionError;
