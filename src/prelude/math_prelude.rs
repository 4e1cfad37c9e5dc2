pub use crate::math::{gaussian_kernel, pseudo_inverse, validate_kernel_width};
pub use crate::math::squared_euclidean_distance_row;
