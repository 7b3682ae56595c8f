#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use loanwise::{ClassifierModel, ModelError, ModelLoader, PredictorConfig, RawApplication};
use ndarray::ArrayView2;
use tempfile::TempDir;

pub const APPROVAL_BYTES: &[u8] = b"GIF89a approved";
pub const REJECTION_BYTES: &[u8] = b"GIF89a rejected";

/// Two trees keyed on credit history; the first also caps the loan amount.
pub const CREDIT_FOREST: &str = r#"{
    "name": "Random_Forest",
    "n_features": 16,
    "classes": [0, 1],
    "trees": [
        { "nodes": [
            { "feature": 4, "threshold": 0.5, "left": 1, "right": 2 },
            { "value": [90.0, 10.0] },
            { "feature": 2, "threshold": 400.0, "left": 3, "right": 4 },
            { "value": [20.0, 80.0] },
            { "value": [70.0, 30.0] }
        ] },
        { "nodes": [
            { "feature": 4, "threshold": 0.5, "left": 1, "right": 2 },
            { "value": [0.8, 0.2] },
            { "value": [0.25, 0.75] }
        ] }
    ]
}"#;

pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

/// A temp directory holding both assets and, optionally, a model file.
pub struct Fixture {
    pub dir: TempDir,
    pub config: PredictorConfig,
}

pub fn fixture(model_json: Option<&str>) -> Result<Fixture, std::io::Error> {
    let dir = tempfile::tempdir()?;
    let config = PredictorConfig {
        model_path: dir.path().join("Random_Forest.json"),
        approval_asset: dir.path().join("6m-rain.gif"),
        rejection_asset: dir.path().join("green-cola-no.gif"),
        model_sha256: None,
    };
    fs::write(&config.approval_asset, APPROVAL_BYTES)?;
    fs::write(&config.rejection_asset, REJECTION_BYTES)?;
    if let Some(json) = model_json {
        fs::write(&config.model_path, json)?;
    }
    Ok(Fixture { dir, config })
}

/// Income 5000, loan 150K over 360 months, good credit, married male graduate, urban.
pub fn scenario_a() -> RawApplication {
    RawApplication {
        applicant_income: 5000.0,
        coapplicant_income: 0.0,
        loan_amount: 150.0,
        loan_term: 360.0,
        credit_history: 1.0,
        gender: "Male".into(),
        married: "Yes".into(),
        self_employed: "No".into(),
        dependents: "0".into(),
        education: "Graduate".into(),
        property_area: "Urban".into(),
    }
}

struct FixedLabel(i64);

impl ClassifierModel for FixedLabel {
    fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        Ok(vec![self.0; samples.nrows()])
    }
}

/// Loads a model that always answers `label`, counting every load.
#[derive(Clone)]
pub struct StubLoader {
    pub label: i64,
    pub loads: Arc<AtomicUsize>,
}

impl StubLoader {
    pub fn new(label: i64) -> Self {
        Self {
            label,
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelLoader for StubLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn ClassifierModel>, ModelError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FixedLabel(self.label)))
    }
}

/// Behaves as if the model artifact were missing.
pub struct MissingArtifactLoader;

impl ModelLoader for MissingArtifactLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ClassifierModel>, ModelError> {
        Err(ModelError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        })
    }
}

struct Exploding;

impl ClassifierModel for Exploding {
    fn predict(&self, _samples: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        Err(ModelError::Prediction("model exploded".into()))
    }
}

/// Loads fine, fails on predict.
pub struct ExplodingLoader;

impl ModelLoader for ExplodingLoader {
    fn load(&self, _path: &Path) -> Result<Box<dyn ClassifierModel>, ModelError> {
        Ok(Box::new(Exploding))
    }
}
