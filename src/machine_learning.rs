use crate::error::ModelError;
use ndarray::{ArrayView1, ArrayView2};

/// This module provides helper functions for machine learning models
mod helper_functions;
/// Kernel width search over randomly drawn candidate populations, labelled
/// as an Imperialist Competitive Algorithm
pub mod imperialist_competitive;
/// Radial basis function network fitted in closed form through a pseudo-inverse
pub mod rbf_network;

pub use helper_functions::preliminary_check;
pub use imperialist_competitive::*;
pub use rbf_network::*;
