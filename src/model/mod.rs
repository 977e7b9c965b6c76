//! Serialized model assets: feature scaler and regression models.

/// Asset file loading.
pub mod assets;
pub mod regressor;
/// Per-feature standardization.
pub mod scaler;

pub use assets::{load_model, load_scaler};
pub use regressor::{Aggregation, LinearModel, Node, RegressionModel, Regressor, Tree, TreeEnsemble};
pub use scaler::StandardScaler;
