use crate::error::ModelError;
use ndarray::prelude::*;
use ndarray::Data;

/// Decision threshold separating the two classes of a real-valued network output.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Checks that two 1D arrays are non-empty and positionally aligned.
fn check_aligned<S1, S2>(
    first: &ArrayBase<S1, Ix1>,
    second: &ArrayBase<S2, Ix1>,
) -> Result<(), ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if first.len() != second.len() {
        return Err(ModelError::ShapeMismatch(format!(
            "Input arrays must have the same length, got {} and {}",
            first.len(),
            second.len()
        )));
    }

    if first.is_empty() {
        return Err(ModelError::InputValidationError(
            "Input arrays must not be empty".to_string(),
        ));
    }

    Ok(())
}

/// Calculates the Mean Squared Error between actual and predicted values.
///
/// Mean Squared Error measures the average of the squared differences between predicted values and ground truth values.
/// It is the fitness minimised by the kernel width search.
///
/// # Parameters
///
/// - `y_true` - Ground-truth values for each sample
/// - `y_pred` - Predicted values for each sample
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::metric::mean_squared_error;
///
/// let actual = array![3.0, -0.5, 2.0, 7.0];
/// let predicted = array![2.5, 0.0, 2.1, 7.8];
/// let mse = mean_squared_error(&actual, &predicted).unwrap();
/// // MSE = (0.25 + 0.25 + 0.01 + 0.64) / 4 = 0.2875
/// assert!((mse - 0.2875).abs() < 1e-10);
/// ```
///
/// # Returns
///
/// - `Ok(f64)` - Mean squared error
/// - `Err(ModelError::ShapeMismatch)` - If the two arrays have different lengths
/// - `Err(ModelError::InputValidationError)` - If the arrays are empty
pub fn mean_squared_error<S1, S2>(
    y_true: &ArrayBase<S1, Ix1>,
    y_pred: &ArrayBase<S2, Ix1>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_aligned(y_true, y_pred)?;

    let sum_squared_diff = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(0.0, |acc, (&actual, &pred)| {
            let error = actual - pred;
            acc + error * error
        });

    Ok(sum_squared_diff / y_true.len() as f64)
}

/// Calculates the Root Mean Squared Error (RMSE) between actual and predicted values.
///
/// # Parameters
///
/// - `y_true` - Ground-truth values for each sample
/// - `y_pred` - Predicted values for each sample
///
/// # Returns
///
/// - `Ok(f64)` - Square root of the mean squared error
/// - `Err(ModelError)` - Under the same conditions as [`mean_squared_error`]
pub fn root_mean_squared_error<S1, S2>(
    y_true: &ArrayBase<S1, Ix1>,
    y_pred: &ArrayBase<S2, Ix1>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    Ok(mean_squared_error(y_true, y_pred)?.sqrt())
}

/// Rounds real-valued network outputs to binary class labels.
///
/// Values greater than or equal to `threshold` become 1.0, everything else 0.0.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::metric::threshold_predictions;
///
/// let raw = array![-0.2, 0.49, 0.5, 1.3];
/// assert_eq!(threshold_predictions(&raw, 0.5), array![0.0, 0.0, 1.0, 1.0]);
/// ```
pub fn threshold_predictions<S>(predictions: &ArrayBase<S, Ix1>, threshold: f64) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    predictions.mapv(|p| if p >= threshold { 1.0 } else { 0.0 })
}

/// Calculate the accuracy of a binary classifier from real-valued outputs.
///
/// Both arrays are thresholded at [`DEFAULT_THRESHOLD`] before comparison, so raw
/// network outputs can be passed directly.
///
/// # Parameters
///
/// - `predicted` - Predicted outputs or labels
/// - `actual` - Ground-truth 0/1 labels
///
/// # Examples
/// ```rust
/// use rbfica::metric::accuracy;
/// use ndarray::array;
///
/// let predicted = array![0.1, 0.7, 0.9];
/// let actual = array![0.0, 0.0, 1.0];
/// let acc = accuracy(&predicted, &actual).unwrap();
/// assert!((acc - 0.6666666666666667).abs() < 1e-6);
/// ```
///
/// # Returns
///
/// - `Ok(f64)` - Accuracy in the range \[0.0, 1.0\]
/// - `Err(ModelError)` - If the arrays differ in length or are empty
pub fn accuracy<S1, S2>(
    predicted: &ArrayBase<S1, Ix1>,
    actual: &ArrayBase<S2, Ix1>,
) -> Result<f64, ModelError>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    Ok(ConfusionMatrix::new(predicted, actual)?.accuracy())
}

/// Confusion matrix for binary classification.
///
/// # Fields
///
/// - `tp` - True positives
/// - `fp` - False positives
/// - `tn` - True negatives
/// - `fn_` - False negatives
///
/// # Examples
/// ```rust
/// use ndarray::arr1;
/// use rbfica::metric::ConfusionMatrix;
///
/// let predicted = arr1(&[0.9, 0.2, 0.8, 0.1, 0.3]);
/// let actual = arr1(&[1.0, 0.0, 1.0, 0.0, 1.0]);
/// let cm = ConfusionMatrix::new(&predicted, &actual).unwrap();
///
/// assert_eq!(cm.get_counts(), (2, 0, 2, 1));
/// println!("{}", cm.summary());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    tp: usize,
    fp: usize,
    tn: usize,
    fn_: usize,
}

impl ConfusionMatrix {
    /// Create a new confusion matrix.
    ///
    /// Converts predicted outputs and actual labels into binary outcomes using
    /// [`DEFAULT_THRESHOLD`] and tallies the resulting counts.
    ///
    /// # Parameters
    ///
    /// - `predicted` - Predicted labels or raw outputs
    /// - `actual` - Ground-truth labels
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - Confusion matrix with populated counts
    /// - `Err(ModelError)` - If the arrays differ in length or are empty
    pub fn new<S1, S2>(
        predicted: &ArrayBase<S1, Ix1>,
        actual: &ArrayBase<S2, Ix1>,
    ) -> Result<Self, ModelError>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        check_aligned(predicted, actual)?;

        let mut matrix = Self {
            tp: 0,
            fp: 0,
            tn: 0,
            fn_: 0,
        };

        for (&p, &a) in predicted.iter().zip(actual.iter()) {
            match (p >= DEFAULT_THRESHOLD, a >= DEFAULT_THRESHOLD) {
                (true, true) => matrix.tp += 1,
                (true, false) => matrix.fp += 1,
                (false, true) => matrix.fn_ += 1,
                (false, false) => matrix.tn += 1,
            }
        }

        Ok(matrix)
    }

    /// Get the components of the confusion matrix.
    ///
    /// # Returns
    ///
    /// - `(usize, usize, usize, usize)` - Tuple of (tp, fp, tn, fn) counts
    pub fn get_counts(&self) -> (usize, usize, usize, usize) {
        (self.tp, self.fp, self.tn, self.fn_)
    }

    /// Calculate accuracy: (TP + TN) / (TP + TN + FP + FN).
    pub fn accuracy(&self) -> f64 {
        let total = self.tp + self.tn + self.fp + self.fn_;
        if total == 0 {
            return 0.0;
        }
        (self.tp + self.tn) as f64 / total as f64
    }

    /// Calculate precision: TP / (TP + FP).
    ///
    /// Returns 0.0 when there are no positive predictions.
    pub fn precision(&self) -> f64 {
        if self.tp + self.fp == 0 {
            return 0.0;
        }
        self.tp as f64 / (self.tp + self.fp) as f64
    }

    /// Calculate recall (sensitivity): TP / (TP + FN).
    ///
    /// Returns 1.0 when there are no actual positives.
    pub fn recall(&self) -> f64 {
        if self.tp + self.fn_ == 0 {
            return 1.0;
        }
        self.tp as f64 / (self.tp + self.fn_) as f64
    }

    /// Calculate F1 score: 2 * (Precision * Recall) / (Precision + Recall).
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();

        if precision + recall == 0.0 {
            return 0.0;
        }

        2.0 * (precision * recall) / (precision + recall)
    }

    /// Generate a formatted summary of the confusion matrix and derived metrics.
    pub fn summary(&self) -> String {
        format!(
            "Confusion Matrix:\n\
        |                 | Predicted Positive | Predicted Negative |\n\
        |-----------------|--------------------|--------------------|\n\
        | Actual Positive | TP: {:<14} | FN: {:<14} |\n\
        | Actual Negative | FP: {:<14} | TN: {:<14} |\n\
        \n\
        Performance Metrics:\n\
        - Accuracy: {:.4}\n\
        - Precision: {:.4}\n\
        - Recall: {:.4}\n\
        - F1 Score: {:.4}",
            self.tp,
            self.fn_,
            self.fp,
            self.tn,
            self.accuracy(),
            self.precision(),
            self.recall(),
            self.f1_score()
        )
    }
}
