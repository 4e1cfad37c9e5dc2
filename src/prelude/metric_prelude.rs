pub use crate::metric::{
    mean_squared_error,
    root_mean_squared_error,
    threshold_predictions,
    accuracy,
    ConfusionMatrix,
    DEFAULT_THRESHOLD,
};
