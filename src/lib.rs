//! Radial basis function networks for binary classification, fitted in closed form
//! through a Moore-Penrose pseudo-inverse, together with a population-based search
//! for the Gaussian kernel width.
//!
//! # Example
//! ```rust
//! use ndarray::{Array1, Array2};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use rbfica::prelude::*;
//!
//! let x = Array2::from_shape_fn((30, 2), |(i, j)| ((i * 11 + j * 5) % 30) as f64 / 30.0);
//! let y = Array1::from_shape_fn(30, |i| if x[[i, 0]] < 0.5 { 1.0 } else { 0.0 });
//!
//! let mut search = ImperialistCompetitive::new(
//!     RBFNetwork::new(6, 1.0).unwrap(),
//!     x.view(),
//!     y.view(),
//!     8,
//!     2,
//!     (0.1, 5.0),
//! )
//! .with_random_seed(Some(7));
//! let width = search.run().unwrap();
//!
//! let mut model = RBFNetwork::new(6, width).unwrap();
//! model.fit(x.view(), y.view(), &mut StdRng::seed_from_u64(7)).unwrap();
//! let labels = threshold_predictions(&model.predict(x.view()).unwrap(), DEFAULT_THRESHOLD);
//! assert_eq!(labels.len(), 30);
//! ```

/// Error type shared by every fallible operation in the crate
pub mod error;

pub use error::ModelError;

/// A macro that generates a getter method for any field.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_sigma)
/// - `$field_name` - The name of the field to access (e.g., sigma)
/// - `$return_type` - The return type of the getter method
#[cfg(any(feature = "machine_learning", feature = "utility"))]
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// A macro that generates a public getter method returning a reference to an optional field.
///
/// # Parameters
///
/// - `$method_name` - The identifier for the generated getter method name
/// - `$field_name` - The identifier of the struct field to access
/// - `$return_type` - The type expression for the return value (typically `Option<&Type>`)
#[cfg(any(feature = "machine_learning", feature = "utility"))]
macro_rules! get_field_as_ref {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field as a reference")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name.as_ref()
        }
    };
}

/// Module `math` contains the numerical building blocks of the network.
///
/// # Core Functions
/// - `squared_euclidean_distance_row` - Squared Euclidean distance between two vectors
/// - `gaussian_kernel` - Gaussian radial basis function `exp(-||x - c||^2 / (2 sigma^2))`
/// - `validate_kernel_width` - Checks that a kernel width is positive and finite
/// - `pseudo_inverse` - Moore-Penrose pseudo-inverse through SVD
///
/// # Example
/// ```rust
/// use rbfica::math::{gaussian_kernel, pseudo_inverse};
/// use ndarray::array;
///
/// let x = array![0.5, -1.0];
/// assert_eq!(gaussian_kernel(&x, &x, 2.0).unwrap(), 1.0);
///
/// let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
/// let pinv = pseudo_inverse(a.view()).unwrap();
/// assert_eq!(pinv.shape(), &[2, 3]);
/// ```
#[cfg(feature = "math")]
pub mod math;

/// Module `machine_learning` provides the RBF network and its kernel width search.
///
/// # Models
/// - `RBFNetwork` - Gaussian RBF network whose output weights are solved by pseudo-inverse
///
/// # Hyperparameter Search
/// - `ImperialistCompetitive` - Generation sweeps of randomly drawn kernel widths,
///   keeping the width with the lowest training mean squared error
#[cfg(feature = "machine_learning")]
pub mod machine_learning;

/// A convenience module that re-exports the most commonly used types and functions from this crate.
///
/// # Examples
/// ```rust
/// use rbfica::prelude::*;
///
/// let model = RBFNetwork::default();
/// assert_eq!(model.get_num_centers(), 10);
/// ```
pub mod prelude;

/// Data preparation steps that surround the network: splitting and feature scaling.
///
/// # Functions and Types
/// - `train_test_split` - Shuffled split into training and test sets
/// - `StandardScaler` - Z-score scaling fitted on training rows only
#[cfg(feature = "utility")]
pub mod utility;

/// Evaluation metrics for regression-style outputs and binary classification.
///
/// # Examples
/// ```rust
/// use rbfica::metric::*;
/// use ndarray::array;
///
/// let outputs = array![0.9, 0.2, 0.6, 0.4];
/// let labels = array![1.0, 0.0, 0.0, 1.0];
///
/// let mse = mean_squared_error(&labels, &outputs).unwrap();
/// let cm = ConfusionMatrix::new(&outputs, &labels).unwrap();
/// println!("MSE: {:.3}, accuracy: {:.3}", mse, cm.accuracy());
/// ```
#[cfg(feature = "metric")]
pub mod metric;

/// Synthetic datasets for experimentation.
///
/// # Available Datasets
/// - **landslide**: Randomly sampled slope records labelled by an infinite-slope stability rule
///   (5 features, binary target)
#[cfg(feature = "dataset")]
pub mod dataset;

/// End-to-end landslide susceptibility workflow: generate, split, scale, search, refit, report.
#[cfg(all(feature = "machine_learning", feature = "utility", feature = "dataset"))]
pub mod pipeline;
