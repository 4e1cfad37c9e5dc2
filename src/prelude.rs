pub use crate::error::ModelError;

/// Prelude module for machine learning functionality.
#[cfg(feature = "machine_learning")]
pub mod machine_learning_prelude;
/// Prelude module for utility functions.
#[cfg(feature = "utility")]
pub mod utility_prelude;
/// Prelude module for mathematical operations.
#[cfg(feature = "math")]
pub mod math_prelude;
/// Prelude module for evaluation metrics.
#[cfg(feature = "metric")]
pub mod metric_prelude;
/// Prelude module for datasets.
#[cfg(feature = "dataset")]
pub mod dataset_prelude;

#[cfg(feature = "dataset")]
pub use dataset_prelude::*;
#[cfg(feature = "machine_learning")]
pub use machine_learning_prelude::*;
#[cfg(feature = "math")]
pub use math_prelude::*;
#[cfg(feature = "metric")]
pub use metric_prelude::*;
#[cfg(feature = "utility")]
pub use utility_prelude::*;
