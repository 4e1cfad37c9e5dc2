pub use crate::dataset::landslide::{LANDSLIDE_FEATURES, generate_landslide_dataset};
