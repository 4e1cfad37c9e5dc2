use super::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rng};

/// Fraction of rows held out when no `test_size` is given.
pub const DEFAULT_TEST_SIZE: f64 = 0.3;

/// Row indices of a shuffled train/test partition.
///
/// Both index sets are non-empty, disjoint, and together cover `0..n_samples`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl SplitIndices {
    /// Shuffles `0..n_samples` with `rng` and holds out `round(n_samples * test_size)` rows,
    /// clamped so that each side keeps at least one row.
    ///
    /// # Parameters
    ///
    /// - `n_samples` - Number of rows to partition, at least 2
    /// - `test_size` - Fraction of rows placed in the test set, in (0, 1)
    /// - `rng` - Random source for the shuffle
    ///
    /// # Returns
    ///
    /// - `Ok(SplitIndices)` - The partition
    /// - `Err(ModelError::InputValidationError)` - If `test_size` is outside (0, 1) or fewer than 2 rows are given
    ///
    /// # Examples
    /// ```rust
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use rbfica::utility::train_test_split::SplitIndices;
    ///
    /// let split = SplitIndices::new(10, 0.2, &mut StdRng::seed_from_u64(0)).unwrap();
    /// assert_eq!((split.train.len(), split.test.len()), (8, 2));
    /// ```
    pub fn new<R>(n_samples: usize, test_size: f64, rng: &mut R) -> Result<Self, ModelError>
    where
        R: Rng + ?Sized,
    {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(ModelError::InputValidationError(format!(
                "test_size must lie strictly between 0 and 1, got {}",
                test_size
            )));
        }

        if n_samples < 2 {
            return Err(ModelError::InputValidationError(format!(
                "At least 2 samples are needed for a train/test split, got {}",
                n_samples
            )));
        }

        let n_test = ((n_samples as f64 * test_size).round() as usize).clamp(1, n_samples - 1);

        let mut order: Vec<usize> = (0..n_samples).collect();
        order.shuffle(rng);
        let train = order.split_off(n_test);

        Ok(SplitIndices { train, test: order })
    }

    /// Gathers the rows of `x` and `y` selected by this partition.
    ///
    /// # Returns
    ///
    /// - `(x_train, x_test, y_train, y_test)`
    pub fn apply(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
    ) -> (Array2<f64>, Array2<f64>, Array1<f64>, Array1<f64>) {
        (
            x.select(Axis(0), &self.train),
            x.select(Axis(0), &self.test),
            y.select(Axis(0), &self.train),
            y.select(Axis(0), &self.test),
        )
    }
}

/// Splits aligned features and targets into shuffled training and test sets.
///
/// # Parameters
///
/// - `x` - Feature matrix, one row per sample
/// - `y` - Targets aligned with the rows of `x`
/// - `test_size` - Fraction of rows held out, [`DEFAULT_TEST_SIZE`] when `None`
/// - `random_state` - Seed for the shuffle, a fresh thread-local draw when `None`
///
/// # Returns
///
/// - `Ok((x_train, x_test, y_train, y_test))` - The two splits
/// - `Err(ModelError::InputValidationError)` - If `x` is empty, has a single row, or `test_size` is outside (0, 1)
/// - `Err(ModelError::ShapeMismatch)` - If `x` and `y` have different lengths
///
/// # Example
/// ```rust
/// use ndarray::{Array1, Array2};
/// use rbfica::utility::train_test_split::train_test_split;
///
/// let x = Array2::from_shape_vec((5, 2), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// let y = Array1::from(vec![0.0, 1.0, 0.0, 1.0, 0.0]);
/// let (x_train, x_test, y_train, y_test) = train_test_split(x.view(), y.view(), Some(0.4), Some(42)).unwrap();
/// assert_eq!(x_train.nrows(), 3);
/// assert_eq!(x_test.nrows(), 2);
/// ```
pub fn train_test_split(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    test_size: Option<f64>,
    random_state: Option<u64>,
) -> Result<(Array2<f64>, Array2<f64>, Array1<f64>, Array1<f64>), ModelError> {
    if x.nrows() == 0 {
        return Err(ModelError::InputValidationError(
            "Cannot split an empty dataset".to_string(),
        ));
    }

    if x.nrows() != y.len() {
        return Err(ModelError::ShapeMismatch(format!(
            "x has {} rows but y has {} values",
            x.nrows(),
            y.len()
        )));
    }

    let test_size = test_size.unwrap_or(DEFAULT_TEST_SIZE);
    let split = match random_state {
        Some(seed) => SplitIndices::new(x.nrows(), test_size, &mut StdRng::seed_from_u64(seed))?,
        None => SplitIndices::new(x.nrows(), test_size, &mut rng())?,
    };

    Ok(split.apply(x, y))
}
