use crate::error::ModelError;
use nalgebra::{DMatrix, linalg::SVD};
use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix1};

/// Upper bound on the iterations nalgebra's SVD may spend before giving up.
const SVD_MAX_ITERATIONS: usize = 10_000;

/// Calculates the squared Euclidean distance between two vectors.
///
/// # Parameters
///
/// - `x1` - First vector
/// - `x2` - Second vector
///
/// # Returns
///
/// - `f64` - Squared Euclidean distance between the two vectors
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::math::squared_euclidean_distance_row;
///
/// let v1 = array![1.0, 2.0, 3.0];
/// let v2 = array![4.0, 5.0, 6.0];
/// let dist = squared_euclidean_distance_row(&v1, &v2);
/// // (4-1)^2 + (5-2)^2 + (6-3)^2 = 9 + 9 + 9 = 27
/// assert!((dist - 27.0).abs() < 1e-10);
/// ```
#[inline]
pub fn squared_euclidean_distance_row<S1, S2>(
    x1: &ArrayBase<S1, Ix1>,
    x2: &ArrayBase<S2, Ix1>,
) -> f64
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    x1.iter()
        .zip(x2.iter())
        .map(|(a, b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}

/// Validates that a Gaussian kernel width is positive and finite.
///
/// # Parameters
///
/// * `sigma` - The kernel width to validate
///
/// # Returns
///
/// - `Ok(())` - If the width is valid
/// - `Err(ModelError::InvalidParameter)` - If the width is zero, negative, NaN or infinite
pub fn validate_kernel_width(sigma: f64) -> Result<(), ModelError> {
    if sigma <= 0.0 || !sigma.is_finite() {
        return Err(ModelError::InvalidParameter(format!(
            "kernel width sigma must be positive and finite, got {}",
            sigma
        )));
    }

    Ok(())
}

/// Evaluates the Gaussian radial basis function between a sample and a center.
///
/// K(x, c) = exp(-||x - c||^2 / (2 * sigma^2))
///
/// # Parameters
///
/// - `x` - Feature vector
/// - `center` - Center vector, must have the same length as `x`
/// - `sigma` - Kernel width, must be positive and finite
///
/// # Returns
///
/// - `Ok(f64)` - Kernel value in (0, 1], exactly 1.0 when `x == center`
/// - `Err(ModelError::InvalidParameter)` - If `sigma` is not positive and finite
/// - `Err(ModelError::ShapeMismatch)` - If `x` and `center` differ in length
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::math::gaussian_kernel;
///
/// let x = array![1.0, 2.0];
/// assert_eq!(gaussian_kernel(&x, &x, 0.5).unwrap(), 1.0);
///
/// let c = array![1.0, 4.0];
/// // ||x - c||^2 = 4, so K = exp(-4 / 2) = exp(-2)
/// let k = gaussian_kernel(&x, &c, 1.0).unwrap();
/// assert!((k - (-2.0f64).exp()).abs() < 1e-12);
/// ```
#[inline]
pub fn gaussian_kernel<S1, S2>(
    x: &ArrayBase<S1, Ix1>,
    center: &ArrayBase<S2, Ix1>,
    sigma: f64,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    validate_kernel_width(sigma)?;

    if x.len() != center.len() {
        return Err(ModelError::ShapeMismatch(format!(
            "sample has {} features but center has {}",
            x.len(),
            center.len()
        )));
    }

    let squared_distance = squared_euclidean_distance_row(x, center);
    Ok((-squared_distance / (2.0 * sigma * sigma)).exp())
}

/// Computes the Moore-Penrose pseudo-inverse of a matrix through SVD.
///
/// Singular values not larger than `max(rows, cols) * eps * sigma_max` are treated
/// as zero, which yields the minimum-norm least-squares inverse for rank-deficient
/// or non-square inputs.
///
/// # Parameters
///
/// * `a` - Matrix of shape (m, n)
///
/// # Returns
///
/// - `Ok(Array2<f64>)` - The pseudo-inverse with shape (n, m)
/// - `Err(ModelError::InputValidationError)` - If the matrix is empty
/// - `Err(ModelError::NumericalError)` - If the matrix contains NaN or infinite values or the SVD does not converge
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::math::pseudo_inverse;
///
/// let a = array![[2.0, 0.0], [0.0, 4.0], [0.0, 0.0]];
/// let pinv = pseudo_inverse(a.view()).unwrap();
/// assert_eq!(pinv.shape(), &[2, 3]);
/// assert!((pinv[[0, 0]] - 0.5).abs() < 1e-12);
/// assert!((pinv[[1, 1]] - 0.25).abs() < 1e-12);
/// ```
pub fn pseudo_inverse(a: ArrayView2<f64>) -> Result<Array2<f64>, ModelError> {
    let (n_rows, n_cols) = a.dim();

    if n_rows == 0 || n_cols == 0 {
        return Err(ModelError::InputValidationError(
            "Cannot invert an empty matrix".to_string(),
        ));
    }

    if a.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NumericalError(
            "Matrix contains NaN or infinite values".to_string(),
        ));
    }

    let matrix = DMatrix::from_fn(n_rows, n_cols, |i, j| a[[i, j]]);
    let svd = SVD::try_new(matrix, true, true, f64::EPSILON, SVD_MAX_ITERATIONS).ok_or_else(
        || ModelError::NumericalError("SVD failed to converge".to_string()),
    )?;

    let max_singular_value = svd.singular_values.max();
    let tolerance = n_rows.max(n_cols) as f64 * f64::EPSILON * max_singular_value;

    let pinv = svd
        .pseudo_inverse(tolerance)
        .map_err(|e| ModelError::NumericalError(format!("Pseudo-inverse failed: {}", e)))?;

    let result = Array2::from_shape_fn((n_cols, n_rows), |(i, j)| pinv[(i, j)]);

    if result.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NumericalError(
            "Pseudo-inverse contains NaN or infinite values".to_string(),
        ));
    }

    Ok(result)
}
