use super::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Standard deviations below this value are treated as zero and replaced by 1.0.
const MIN_STD: f64 = 1e-10;

/// Z-score feature scaler.
///
/// `fit` learns the per-column mean and population standard deviation from the
/// training rows; `transform` applies `(x - mean) / std` to any matrix with the
/// same columns. Constant columns are only centered.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::utility::StandardScaler;
///
/// let train = array![[1.0, 10.0], [3.0, 10.0], [5.0, 10.0]];
/// let test = array![[3.0, 12.0]];
///
/// let mut scaler = StandardScaler::new();
/// let train_scaled = scaler.fit_transform(train.view()).unwrap();
/// let test_scaled = scaler.transform(test.view()).unwrap();
///
/// assert!(train_scaled.column(0).sum().abs() < 1e-12);
/// assert_eq!(test_scaled[[0, 0]], 0.0);
/// assert_eq!(test_scaled[[0, 1]], 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    means: Option<Array1<f64>>,
    stds: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Creates an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }

    get_field_as_ref!(get_means, means, Option<&Array1<f64>>);
    get_field_as_ref!(get_stds, stds, Option<&Array1<f64>>);

    /// Learns column means and standard deviations from `x`.
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Self)` - Returns mutable reference to self for method chaining
    /// - `Err(ModelError::InputValidationError)` - If `x` is empty or contains NaN or infinite values
    pub fn fit(&mut self, x: ArrayView2<f64>) -> Result<&mut Self, ModelError> {
        if x.is_empty() {
            return Err(ModelError::InputValidationError(
                "Cannot fit a scaler on an empty matrix".to_string(),
            ));
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InputValidationError(
                "Input contains NaN or infinite values".to_string(),
            ));
        }

        let stats: Vec<(f64, f64)> = (0..x.ncols())
            .into_par_iter()
            .map(|j| {
                let column = x.column(j);
                let mean = column.iter().mean();
                let std = column.iter().population_std_dev();
                (mean, if std < MIN_STD { 1.0 } else { std })
            })
            .collect();

        self.means = Some(stats.iter().map(|&(mean, _)| mean).collect());
        self.stds = Some(stats.iter().map(|&(_, std)| std).collect());

        Ok(self)
    }

    /// Scales `x` with the statistics learned by `fit`.
    ///
    /// # Returns
    ///
    /// - `Ok(Array2<f64>)` - Scaled copy of `x`
    /// - `Err(ModelError::NotFitted)` - If `fit` has not been called
    /// - `Err(ModelError::ShapeMismatch)` - If `x` has a different number of columns than the fitted data
    pub fn transform(&self, x: ArrayView2<f64>) -> Result<Array2<f64>, ModelError> {
        let (means, stds) = match (&self.means, &self.stds) {
            (Some(means), Some(stds)) => (means, stds),
            _ => return Err(ModelError::NotFitted),
        };

        if x.ncols() != means.len() {
            return Err(ModelError::ShapeMismatch(format!(
                "Scaler was fitted on {} columns but input has {}",
                means.len(),
                x.ncols()
            )));
        }

        let mut scaled = x.to_owned();
        for mut row in scaled.axis_iter_mut(Axis(0)) {
            row -= means;
            row /= stds;
        }

        Ok(scaled)
    }

    /// Fits the scaler on `x` and returns the scaled `x`.
    pub fn fit_transform(&mut self, x: ArrayView2<f64>) -> Result<Array2<f64>, ModelError> {
        self.fit(x)?;
        self.transform(x)
    }
}
