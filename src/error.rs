/// Error types that can occur during model operations
///
/// # Variants
///
/// - `InvalidParameter` - A model parameter is out of its valid domain (e.g. a non-positive kernel width)
/// - `ShapeMismatch` - Two vectors or matrices do not have compatible dimensions
/// - `InsufficientData` - Fewer samples were supplied than the model requires
/// - `NotFitted` - Indicates that the model has not been fitted yet
/// - `NumericalError` - A numerical routine (e.g. the pseudo-inverse solve) failed or produced non-finite values
/// - `InvalidConfiguration` - Search parameters under which no candidate could ever be evaluated
/// - `NoFeasibleCandidate` - Every candidate evaluated during a search failed
/// - `InputValidationError` - The input data is empty or contains NaN or infinite values
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidParameter(String),
    ShapeMismatch(String),
    InsufficientData(String),
    NotFitted,
    NumericalError(String),
    InvalidConfiguration(String),
    NoFeasibleCandidate(String),
    InputValidationError(String),
}

impl ModelError {
    /// Returns whether a search loop may skip the failed candidate and carry on.
    ///
    /// Only numerical failures depend on the candidate itself; every other
    /// error would repeat identically for the next candidate.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ModelError::NumericalError(_))
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ModelError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            ModelError::InsufficientData(msg) => write!(f, "Insufficient data: {}", msg),
            ModelError::NotFitted => {
                write!(
                    f,
                    "Model has not been fitted. Certain methods require the model to be fitted before use."
                )
            }
            ModelError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            ModelError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            ModelError::NoFeasibleCandidate(msg) => write!(f, "No feasible candidate: {}", msg),
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
        }
    }
}

/// Implements the standard error trait for ModelError
impl std::error::Error for ModelError {}
