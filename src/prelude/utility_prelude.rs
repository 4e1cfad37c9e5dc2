pub use crate::utility::standard_scaler::StandardScaler;
pub use crate::utility::train_test_split::{SplitIndices, train_test_split};
