use super::preliminary_check;
use crate::error::ModelError;
use crate::math::{gaussian_kernel, pseudo_inverse, validate_kernel_width};
use crate::metric::mean_squared_error;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::Rng;
use rand::seq::index;
use rayon::prelude::*;
use tracing::debug;

/// Threshold for parallelization when building activation matrices.
/// Inputs with fewer rows are processed sequentially.
const RBF_PARALLEL_THRESHOLD: usize = 1000;

/// Radial Basis Function network with Gaussian hidden units.
///
/// The hidden layer uses `num_centers` training samples, drawn uniformly without
/// replacement on every call to `fit`, as kernel centers. The output weights are
/// the least-squares solution `pinv(G) * y`, where `G` is the activation matrix of
/// the training samples against the centers. No iterative training is involved,
/// so one call to `fit` fully determines the model for a given draw of centers.
///
/// # Fields
///
/// - `num_centers` - Number of hidden units (centers)
/// - `sigma` - Width of the Gaussian kernel shared by all hidden units
/// - `centers` - Selected centers, `None` before fitting
/// - `weights` - Output weights, one per center, `None` before fitting
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rbfica::machine_learning::rbf_network::RBFNetwork;
///
/// let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
/// let y = array![0.0, 1.0, 1.0, 0.0];
///
/// let mut model = RBFNetwork::new(4, 0.5).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// model.fit(x.view(), y.view(), &mut rng).unwrap();
///
/// // With one center per sample the network interpolates the targets
/// let predictions = model.predict(x.view()).unwrap();
/// for (p, t) in predictions.iter().zip(y.iter()) {
///     assert!((p - t).abs() < 1e-6);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RBFNetwork {
    num_centers: usize,
    sigma: f64,
    centers: Option<Array2<f64>>,
    weights: Option<Array1<f64>>,
}

impl Default for RBFNetwork {
    /// Creates a network with 10 centers and a kernel width of 1.0
    fn default() -> Self {
        RBFNetwork::new(10, 1.0).expect("Default RBFNetwork parameters should be valid")
    }
}

impl RBFNetwork {
    /// Creates a new, unfitted RBF network.
    ///
    /// # Parameters
    ///
    /// - `num_centers` - Number of hidden units, must be greater than 0
    /// - `sigma` - Initial kernel width, must be positive and finite
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A new unfitted network
    /// - `Err(ModelError::InvalidParameter)` - If `num_centers` is 0 or `sigma` is invalid
    pub fn new(num_centers: usize, sigma: f64) -> Result<Self, ModelError> {
        if num_centers == 0 {
            return Err(ModelError::InvalidParameter(
                "num_centers must be greater than 0".to_string(),
            ));
        }
        validate_kernel_width(sigma)?;

        Ok(RBFNetwork {
            num_centers,
            sigma,
            centers: None,
            weights: None,
        })
    }

    // Getters
    get_field!(get_num_centers, num_centers, usize);
    get_field!(get_sigma, sigma, f64);
    get_field_as_ref!(get_centers, centers, Option<&Array2<f64>>);
    get_field_as_ref!(get_weights, weights, Option<&Array1<f64>>);

    /// Sets the kernel width used by subsequent calls to `fit` and `predict`.
    ///
    /// Weights computed with the previous width are kept but are stale until
    /// the next call to `fit`.
    ///
    /// # Parameters
    ///
    /// * `sigma` - New kernel width, must be positive and finite
    ///
    /// # Returns
    ///
    /// - `Ok(())` - If the width was updated
    /// - `Err(ModelError::InvalidParameter)` - If the width is invalid; the old width is kept
    pub fn set_sigma(&mut self, sigma: f64) -> Result<(), ModelError> {
        validate_kernel_width(sigma)?;
        self.sigma = sigma;
        Ok(())
    }

    /// Fits the network to the training data.
    ///
    /// Draws `num_centers` distinct rows of `x` as centers, builds the activation
    /// matrix and solves for the output weights with the Moore-Penrose pseudo-inverse.
    /// Centers and weights from any previous fit are discarded, including when
    /// this fit fails.
    ///
    /// # Parameters
    ///
    /// - `x` - Feature matrix, each row is a sample, each column is a feature
    /// - `y` - Target vector, one value per row of `x`
    /// - `rng` - Random source used to select the centers
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Self)` - Returns mutable reference to self for method chaining
    /// - `Err(ModelError::InputValidationError)` - If the data is empty or not finite
    /// - `Err(ModelError::ShapeMismatch)` - If `x` and `y` are not aligned
    /// - `Err(ModelError::InsufficientData)` - If `x` has fewer rows than `num_centers`
    /// - `Err(ModelError::NumericalError)` - If the least-squares solve fails
    pub fn fit<R>(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        rng: &mut R,
    ) -> Result<&mut Self, ModelError>
    where
        R: Rng + ?Sized,
    {
        self.centers = None;
        self.weights = None;

        preliminary_check(x, Some(y))?;

        let n_samples = x.nrows();
        if n_samples < self.num_centers {
            return Err(ModelError::InsufficientData(format!(
                "{} centers requested but only {} samples available",
                self.num_centers, n_samples
            )));
        }

        let center_indices = index::sample(rng, n_samples, self.num_centers).into_vec();
        let centers = x.select(Axis(0), &center_indices);

        let g = activation_matrix(x, centers.view(), self.sigma)?;
        let g_pinv = pseudo_inverse(g.view())?;
        let weights = g_pinv.dot(&y);

        if weights.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::NumericalError(
                "Least-squares solve produced NaN or infinite weights".to_string(),
            ));
        }

        debug!(
            n_samples,
            num_centers = self.num_centers,
            sigma = self.sigma,
            "RBF network fitted"
        );

        self.centers = Some(centers);
        self.weights = Some(weights);

        Ok(self)
    }

    /// Computes the activation matrix of `x` against the fitted centers.
    ///
    /// # Returns
    ///
    /// - `Ok(Array2<f64>)` - Matrix of shape (n_samples, num_centers)
    /// - `Err(ModelError::NotFitted)` - If the network has not been fitted yet
    /// - `Err(ModelError::ShapeMismatch)` - If the number of features does not match the centers
    pub fn activation_matrix(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, ModelError> {
        let centers = self.centers.as_ref().ok_or(ModelError::NotFitted)?;
        preliminary_check(x, None)?;
        activation_matrix(x, centers.view(), self.sigma)
    }

    /// Makes predictions using the fitted network.
    ///
    /// The returned values are the raw network outputs `G * weights`; they are not
    /// thresholded to class labels.
    ///
    /// # Parameters
    ///
    /// * `x` - Prediction data, each row is a sample, each column is a feature
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - One output per row of `x`
    /// - `Err(ModelError::NotFitted)` - If the network has not been fitted yet
    /// - `Err(ModelError::ShapeMismatch)` - If the number of features does not match training data
    /// - `Err(ModelError::NumericalError)` - If the outputs are not finite
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>, ModelError> {
        let weights = self.weights.as_ref().ok_or(ModelError::NotFitted)?;
        let g = self.activation_matrix(x)?;
        let predictions = g.dot(weights);

        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(ModelError::NumericalError(
                "Prediction calculation resulted in NaN or infinite values".to_string(),
            ));
        }

        Ok(predictions)
    }

    /// Fits the network and then makes predictions on the same data.
    ///
    /// # Returns
    ///
    /// - `Ok(Array1<f64>)` - The network outputs for the training data
    /// - `Err(ModelError)` - Any error raised by `fit` or `predict`
    pub fn fit_predict<R>(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        rng: &mut R,
    ) -> Result<Array1<f64>, ModelError>
    where
        R: Rng + ?Sized,
    {
        self.fit(x, y, rng)?;
        self.predict(x)
    }

    /// Returns the mean squared error of the network outputs against `y`.
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Mean squared error
    /// - `Err(ModelError)` - Any error raised by `predict`, or `ShapeMismatch` if `y` is not aligned with `x`
    pub fn score(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<f64, ModelError> {
        let predictions = self.predict(x)?;
        mean_squared_error(&y, &predictions)
    }
}

/// Builds the activation matrix `G[i][j] = K(x_i, c_j)` for the Gaussian kernel.
///
/// Rows are computed in parallel once `x` reaches `RBF_PARALLEL_THRESHOLD` samples.
///
/// # Parameters
///
/// - `x` - Samples, shape (n_samples, n_features)
/// - `centers` - Centers, shape (n_centers, n_features)
/// - `sigma` - Kernel width
///
/// # Returns
///
/// - `Ok(Array2<f64>)` - Activation matrix of shape (n_samples, n_centers)
/// - `Err(ModelError::ShapeMismatch)` - If `x` and `centers` have a different number of features
/// - `Err(ModelError::InvalidParameter)` - If `sigma` is not positive and finite
pub fn activation_matrix(
    x: ArrayView2<f64>,
    centers: ArrayView2<f64>,
    sigma: f64,
) -> Result<Array2<f64>, ModelError> {
    validate_kernel_width(sigma)?;

    if x.ncols() != centers.ncols() {
        return Err(ModelError::ShapeMismatch(format!(
            "Number of features does not match the centers, x columns: {}, center columns: {}",
            x.ncols(),
            centers.ncols()
        )));
    }

    let n_samples = x.nrows();
    let n_centers = centers.nrows();

    let compute_row = |i: usize| -> Result<Vec<f64>, ModelError> {
        let sample = x.row(i);
        centers
            .outer_iter()
            .map(|center| gaussian_kernel(&sample, &center, sigma))
            .collect()
    };

    let rows: Vec<Vec<f64>> = if n_samples >= RBF_PARALLEL_THRESHOLD {
        (0..n_samples)
            .into_par_iter()
            .map(&compute_row)
            .collect::<Result<_, _>>()?
    } else {
        (0..n_samples)
            .map(&compute_row)
            .collect::<Result<_, _>>()?
    };

    Array2::from_shape_vec((n_samples, n_centers), rows.into_iter().flatten().collect()).map_err(
        |e| ModelError::ShapeMismatch(format!("Failed to assemble activation matrix: {}", e)),
    )
}
