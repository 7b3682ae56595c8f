use std::path::Path;

use ndarray::ArrayView2;

pub mod artifact;
mod error;
mod forest;

pub use error::ModelError;
pub use forest::{DecisionTree, Node, RandomForest};

/// A trained classifier. One label is returned per sample row.
pub trait ClassifierModel: Send + Sync {
    fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError>;
}

/// Produces a ready-to-use classifier from an artifact on disk.
pub trait ModelLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ClassifierModel>, ModelError>;
}

/// Loads [`RandomForest`] artifacts stored as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonForestLoader;

impl ModelLoader for JsonForestLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn ClassifierModel>, ModelError> {
        let forest = RandomForest::from_file(path)?;
        Ok(Box::new(forest))
    }
}
