use crate::error::ModelError;
use ndarray::prelude::*;
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Column names of the landslide feature matrix, in column order.
pub const LANDSLIDE_FEATURES: [&str; 5] = [
    "slope_angle",
    "density",
    "water_content",
    "friction_angle",
    "cohesion",
];

/// Sampling range of each feature, aligned with [`LANDSLIDE_FEATURES`].
///
/// Units: degrees, kN/m^3, percent, degrees, kPa.
pub const LANDSLIDE_FEATURE_RANGES: [(f64, f64); 5] = [
    (10.0, 60.0),
    (15.0, 25.0),
    (5.0, 40.0),
    (20.0, 45.0),
    (5.0, 50.0),
];

/// Depth of the potential failure surface in metres.
const FAILURE_DEPTH: f64 = 5.0;

/// Computes the infinite-slope factor of safety of one record.
///
/// FS = c / (gamma * z * sin(beta) * cos(beta)) + (1 - r_u) * tan(phi) / tan(beta)
///
/// where `beta` is the slope angle, `gamma` the unit weight, `phi` the friction angle,
/// `c` the cohesion, `z` a fixed failure depth of 5 m and the pore pressure ratio
/// `r_u` is the water content expressed as a fraction.
///
/// # Parameters
///
/// * `record` - One row with the five columns of [`LANDSLIDE_FEATURES`]
///
/// # Returns
///
/// - `f64` - Factor of safety, below 1.0 for an unstable slope
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use rbfica::dataset::landslide::factor_of_safety;
///
/// let gentle = array![15.0, 18.0, 10.0, 35.0, 30.0];
/// let steep_and_wet = array![55.0, 22.0, 38.0, 22.0, 6.0];
/// assert!(factor_of_safety(gentle.view()) > 1.0);
/// assert!(factor_of_safety(steep_and_wet.view()) < 1.0);
/// ```
pub fn factor_of_safety(record: ArrayView1<f64>) -> f64 {
    let beta = record[0].to_radians();
    let unit_weight = record[1];
    let pore_pressure_ratio = record[2] / 100.0;
    let phi = record[3].to_radians();
    let cohesion = record[4];

    let cohesive = cohesion / (unit_weight * FAILURE_DEPTH * beta.sin() * beta.cos());
    let frictional = (1.0 - pore_pressure_ratio) * phi.tan() / beta.tan();

    cohesive + frictional
}

/// Generates a synthetic landslide susceptibility dataset.
///
/// Each feature is sampled uniformly from its range in [`LANDSLIDE_FEATURE_RANGES`].
/// A record is labelled 1.0 (landslide) when its [`factor_of_safety`] is below 1.0
/// and 0.0 otherwise.
///
/// # Parameters
///
/// - `n_samples` - Number of records to generate, must be greater than 0
/// - `rng` - Random source
///
/// # Returns
///
/// A tuple containing:
/// - `Array1<&'static str>`: The feature names
/// - `Array2<f64>`: A 2D array of shape (n_samples, 5) with the feature values
/// - `Array1<f64>`: A 1D array of length n_samples with the 0/1 labels
///
/// # Errors
///
/// - `ModelError::InputValidationError` - If `n_samples` is 0
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rbfica::dataset::landslide::generate_landslide_dataset;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let (headers, features, labels) = generate_landslide_dataset(200, &mut rng).unwrap();
/// assert_eq!(headers.len(), 5);
/// assert_eq!(features.shape(), &[200, 5]);
/// assert!(labels.iter().all(|&l| l == 0.0 || l == 1.0));
/// ```
pub fn generate_landslide_dataset<R>(
    n_samples: usize,
    rng: &mut R,
) -> Result<(Array1<&'static str>, Array2<f64>, Array1<f64>), ModelError>
where
    R: Rng + ?Sized,
{
    if n_samples == 0 {
        return Err(ModelError::InputValidationError(
            "n_samples must be greater than 0".to_string(),
        ));
    }

    let distributions = LANDSLIDE_FEATURE_RANGES
        .iter()
        .map(|&(low, high)| {
            Uniform::new(low, high).map_err(|e| {
                ModelError::InputValidationError(format!("Invalid feature range: {}", e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut features = Array2::<f64>::zeros((n_samples, LANDSLIDE_FEATURES.len()));
    for mut row in features.rows_mut() {
        for (value, distribution) in row.iter_mut().zip(distributions.iter()) {
            *value = distribution.sample(rng);
        }
    }

    let labels = features
        .rows()
        .into_iter()
        .map(|row| if factor_of_safety(row) < 1.0 { 1.0 } else { 0.0 })
        .collect::<Array1<f64>>();

    Ok((Array1::from_vec(LANDSLIDE_FEATURES.to_vec()), features, labels))
}
