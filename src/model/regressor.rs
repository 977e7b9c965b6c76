//! Pre-fitted regression models and the trait the prediction service calls.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A fitted single-output regression function over a standardized feature row.
///
/// Implementations must be pure: the same row always yields the same output.
pub trait Regressor: Send + Sync {
    /// Number of input features the model was fitted on.
    fn n_features(&self) -> usize;

    /// Evaluates the model on one feature row.
    ///
    /// # Errors
    ///
    /// Returns an [`InferenceError`] if the row width is wrong or the model
    /// cannot be evaluated.
    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError>;

    /// Human-readable model family name.
    fn kind(&self) -> &'static str;
}

fn check_width(expected: usize, features: &[f64]) -> Result<(), InferenceError> {
    if features.len() == expected {
        Ok(())
    } else {
        Err(InferenceError::FeatureCount {
            stage: "model",
            expected,
            actual: features.len(),
        })
    }
}

/// Serialized model asset, dispatched on its `"kind"` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionModel {
    /// Ordinary least-squares style affine model.
    Linear(LinearModel),
    /// Additive or averaged ensemble of binary decision trees.
    TreeEnsemble(TreeEnsemble),
}

impl RegressionModel {
    /// Checks structural validity after deserialization.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Linear(m) => m.validate(),
            Self::TreeEnsemble(m) => m.validate(),
        }
    }
}

impl Regressor for RegressionModel {
    fn n_features(&self) -> usize {
        match self {
            Self::Linear(m) => m.n_features(),
            Self::TreeEnsemble(m) => m.n_features(),
        }
    }

    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError> {
        match self {
            Self::Linear(m) => m.predict_row(features),
            Self::TreeEnsemble(m) => m.predict_row(features),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Linear(m) => m.kind(),
            Self::TreeEnsemble(m) => m.kind(),
        }
    }
}

/// `y = intercept + Σ coefficients[i] * x[i]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.coefficients.is_empty() {
            return Err("linear model has no coefficients".to_string());
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        match self.coefficients.iter().position(|c| !c.is_finite()) {
            Some(i) => Err(format!("coefficients[{i}] is not finite")),
            None => Ok(()),
        }
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.n_features(), features)?;
        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>())
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Gradient-boosting style: `base_score + Σ tree(x)`.
    #[default]
    Sum,
    /// Random-forest style: `base_score + mean(tree(x))`.
    Mean,
}

/// One node of a decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Go to `left` when `x[feature] <= threshold`, otherwise to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, features: &[f64]) -> Result<f64, InferenceError> {
        let mut idx = 0;
        // Children always sit after their parent, so this walk is bounded by
        // the node count.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(Node::Leaf(value)) => return Ok(*value),
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.get(*feature).ok_or_else(|| {
                        InferenceError::MalformedModel(format!(
                            "split on feature {feature} outside the input row"
                        ))
                    })?;
                    idx = if x <= threshold { *left } else { *right };
                }
                None => {
                    return Err(InferenceError::MalformedModel(format!(
                        "node index {idx} out of range"
                    )));
                }
            }
        }
        Err(InferenceError::MalformedModel(
            "tree walk did not reach a leaf".to_string(),
        ))
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Leaf(value) if !value.is_finite() => {
                    return Err(format!("leaf {idx} is not finite"));
                }
                Node::Leaf(_) => {}
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {idx} splits on feature {feature}, model has {n_features}"
                        ));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {idx} has a NaN threshold"));
                    }
                    for child in [left, right] {
                        if *child <= idx || *child >= self.nodes.len() {
                            return Err(format!(
                                "node {idx} points to child {child}; children must follow their parent and exist"
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub n_features: usize,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("n_features must be > 0".to_string());
        }
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err("base_score is not finite".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("trees[{i}]: {e}"))?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, features: &[f64]) -> Result<f64, InferenceError> {
        check_width(self.n_features, features)?;
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features)?;
        }
        let combined = match self.aggregation {
            Aggregation::Sum => total,
            Aggregation::Mean if self.trees.is_empty() => 0.0,
            Aggregation::Mean => total / self.trees.len() as f64,
        };
        Ok(self.base_score + combined)
    }

    fn kind(&self) -> &'static str {
        "tree_ensemble"
    }
}
