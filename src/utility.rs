use crate::error::ModelError;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// This module provides functionality for splitting datasets into training and test sets,
/// which is a fundamental preprocessing step in machine learning workflows
pub mod train_test_split;

/// This module provides z-score feature scaling whose statistics are learned on the
/// training rows and reused for any later data
pub mod standard_scaler;

pub use standard_scaler::*;
pub use train_test_split::*;
