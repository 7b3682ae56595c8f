use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::Deserialize;

use super::error::ModelError;
use super::ClassifierModel;

/// A single node of a decision tree.
///
/// A sample goes to `left` when `sample[feature] <= threshold`, otherwise to
/// `right`. Leaves carry one weight per class (sample counts or fractions).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// A decision tree stored as a flat node array, root first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<Node>,
}

impl DecisionTree {
    /// Children must come after their parent, which also rules out cycles.
    fn validate(&self, tree_index: usize, n_features: usize, n_classes: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("Tree {} has no nodes", tree_index)));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, threshold, left, right } => {
                    if *feature >= n_features {
                        return Err(ModelError::Invalid(format!(
                            "Tree {} node {} splits on feature {} but the model has {} features",
                            tree_index, index, feature, n_features
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::Invalid(format!(
                            "Tree {} node {} has a NaN threshold",
                            tree_index, index
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(ModelError::Invalid(format!(
                                "Tree {} node {} points to invalid child {}",
                                tree_index, index, child
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(ModelError::Invalid(format!(
                            "Tree {} leaf {} has {} class weights, expected {}",
                            tree_index, index, value.len(), n_classes
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn leaf(&self, sample: ArrayView1<'_, f64>) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Split { feature, threshold, left, right } => {
                    index = if sample[*feature] <= *threshold { *left } else { *right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

/// A random forest classifier read from a JSON artifact.
///
/// Prediction averages the normalised leaf distribution of every tree and
/// picks the class with the highest mean probability (the first class wins a
/// tie). Every constructor validates the structure, so a `RandomForest` can
/// always be traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    name: String,
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

/// On-disk layout of a forest artifact.
#[derive(Deserialize)]
struct ForestDocument {
    #[serde(default)]
    name: String,
    n_features: usize,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn new(
        name: impl Into<String>,
        n_features: usize,
        classes: Vec<i64>,
        trees: Vec<DecisionTree>,
    ) -> Result<Self, ModelError> {
        let forest = Self {
            name: name.into(),
            n_features,
            classes,
            trees,
        };
        forest.validate()?;
        Ok(forest)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let doc: ForestDocument = serde_json::from_reader(reader)?;
        Self::new(doc.name, doc.n_features, doc.classes, doc.trees)
    }

    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        info!("Loading model from {:?}", path);
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let forest = Self::from_reader(BufReader::new(file))?;
        info!(
            "Model '{}' loaded: {} trees, {} features, classes {:?}",
            forest.name,
            forest.trees.len(),
            forest.n_features,
            forest.classes
        );
        Ok(forest)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.n_features == 0 {
            return Err(ModelError::Invalid("Model must have at least one feature".into()));
        }
        if self.classes.is_empty() {
            return Err(ModelError::Invalid("Model must have at least one class".into()));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("Model must have at least one tree".into()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features, self.classes.len())?;
        }
        Ok(())
    }

    /// Mean class probabilities, one row per sample and one column per class.
    pub fn predict_proba(&self, samples: ArrayView2<'_, f64>) -> Result<Array2<f64>, ModelError> {
        if samples.ncols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: samples.ncols(),
            });
        }

        let mut proba = Array2::<f64>::zeros((samples.nrows(), self.classes.len()));
        for (sample, mut row) in samples.rows().into_iter().zip(proba.rows_mut()) {
            for tree in &self.trees {
                let leaf = tree.leaf(sample);
                let total: f64 = leaf.iter().sum();
                if total > 0.0 {
                    for (slot, weight) in row.iter_mut().zip(leaf) {
                        *slot += weight / total;
                    }
                }
            }
        }
        proba /= self.trees.len() as f64;
        Ok(proba)
    }
}

impl ClassifierModel for RandomForest {
    fn predict(&self, samples: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        let proba = self.predict_proba(samples)?;
        let labels = proba
            .rows()
            .into_iter()
            .map(|row| {
                let mut best = 0;
                for (index, p) in row.iter().enumerate() {
                    if *p > row[best] {
                        best = index;
                    }
                }
                self.classes[best]
            })
            .collect::<Vec<_>>();
        debug!("Predicted labels {:?}", labels);
        Ok(labels)
    }
}
