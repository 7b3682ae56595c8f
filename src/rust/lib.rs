//! Loan approval prediction from a trained random forest.
//!
//! A submission flows through three stages: the [`FormCollector`] gathers
//! widget values into a [`RawApplication`], [`encode`] turns it into the
//! 16-value [`FeatureVector`] the model was trained on, and the
//! [`PredictorAdapter`] loads the model, predicts and picks the message and
//! image to show.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use loanwise::{encode, AppConfig, FormCollector, PredictorAdapter};
//!
//! let application = FormCollector::new()
//!     .applicant_income(5000.0)?
//!     .loan_amount(150.0)?
//!     .loan_term(360.0)?
//!     .credit_history(1.0)?
//!     .married("Yes")
//!     .property_area("Urban")
//!     .collect();
//!
//! let adapter = PredictorAdapter::new(AppConfig::from_env().predictor_config());
//! match adapter.predict(&encode(&application))? {
//!     Some(outcome) => println!("{}", outcome.message()),
//!     None => println!("No answer from the model"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Every call to [`PredictorAdapter::predict`] reads the model and image files
//! again; nothing is cached between submissions.

pub mod application;
pub mod config;
pub mod dataset;
pub mod encoder;
pub mod form;
pub mod model;
pub mod predictor;
mod session;

pub use application::{CategoryMap, Dependents, PropertyArea, RawApplication};
pub use config::AppConfig;
pub use dataset::{Dataset, DatasetError};
pub use encoder::{encode, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use form::{FormCollector, FormError};
pub use model::{ClassifierModel, JsonForestLoader, ModelError, ModelLoader, RandomForest};
pub use predictor::{
    AssetError, InlineImage, PredictionError, PredictionOutcome, PredictorAdapter, PredictorConfig, Verdict,
};
pub use session::{Feedback, PredictionSession, SessionState};

/// Logs at `warn`, or `info` when `verbose`; `RUST_LOG` overrides both.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();
}
