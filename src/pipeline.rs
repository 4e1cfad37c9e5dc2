use crate::dataset::landslide::generate_landslide_dataset;
use crate::error::ModelError;
use crate::machine_learning::imperialist_competitive::ImperialistCompetitive;
use crate::machine_learning::rbf_network::RBFNetwork;
use crate::metric::{ConfusionMatrix, mean_squared_error};
use crate::utility::{SplitIndices, StandardScaler};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng, rng};
use tracing::info;

/// Settings of the landslide susceptibility workflow.
///
/// # Fields
///
/// - `n_samples` - Number of synthetic records to generate
/// - `test_size` - Fraction of records held out for testing
/// - `num_centers` - Number of RBF centers
/// - `initial_sigma` - Kernel width the network is created with
/// - `population_size` - Candidate widths per search generation
/// - `max_generations` - Number of search generations
/// - `width_range` - Range candidate widths are drawn from
/// - `random_seed` - Seed for every random step, `None` for a fresh seed
/// - `parallel` - Whether candidates are evaluated in parallel
/// - `verbose` - Whether the search shows a progress bar
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub n_samples: usize,
    pub test_size: f64,
    pub num_centers: usize,
    pub initial_sigma: f64,
    pub population_size: usize,
    pub max_generations: usize,
    pub width_range: (f64, f64),
    pub random_seed: Option<u64>,
    pub parallel: bool,
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            test_size: 0.2,
            num_centers: 20,
            initial_sigma: 1.0,
            population_size: 10,
            max_generations: 5,
            width_range: (0.1, 5.0),
            random_seed: Some(42),
            parallel: false,
            verbose: false,
        }
    }
}

/// Summary of one pipeline run.
///
/// Accuracies are computed after thresholding the network outputs at 0.5.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub best_width: f64,
    pub best_fitness: f64,
    pub train_mse: f64,
    pub test_mse: f64,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
    pub test_confusion: ConfusionMatrix,
}

/// Runs the workflow: generate data, split, scale, search the kernel width,
/// refit with the winning width and evaluate on both splits.
///
/// The scaler is fitted on the training rows only and applied to both splits.
/// The refit draws the same centers as the winning candidate, so `train_mse`
/// equals `best_fitness`.
///
/// # Returns
///
/// - `Ok(PipelineReport)` - Metrics of the refitted network
/// - `Err(ModelError)` - Any error raised by one of the steps
///
/// # Examples
/// ```rust
/// use rbfica::pipeline::{PipelineConfig, run_pipeline};
///
/// let config = PipelineConfig {
///     n_samples: 120,
///     num_centers: 10,
///     population_size: 4,
///     max_generations: 2,
///     ..PipelineConfig::default()
/// };
/// let report = run_pipeline(&config).unwrap();
/// assert!((0.1..=5.0).contains(&report.best_width));
/// assert!((0.0..=1.0).contains(&report.test_accuracy));
/// ```
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport, ModelError> {
    let seed = match config.random_seed {
        Some(seed) => seed,
        None => rng().next_u64(),
    };
    let mut data_rng = StdRng::seed_from_u64(seed);

    let (_, features, labels) = generate_landslide_dataset(config.n_samples, &mut data_rng)?;
    let positives = labels.iter().filter(|&&l| l == 1.0).count();
    info!(
        n_samples = config.n_samples,
        positives, "Generated landslide dataset"
    );

    let split = SplitIndices::new(features.nrows(), config.test_size, &mut data_rng)?;
    let (x_train, x_test, y_train, y_test) = split.apply(features.view(), labels.view());

    let mut scaler = StandardScaler::new();
    let x_train = scaler.fit_transform(x_train.view())?;
    let x_test = scaler.transform(x_test.view())?;
    info!(
        train_rows = x_train.nrows(),
        test_rows = x_test.nrows(),
        "Split and scaled features"
    );

    let model = RBFNetwork::new(config.num_centers, config.initial_sigma)?;
    let mut search = ImperialistCompetitive::new(
        model,
        x_train.view(),
        y_train.view(),
        config.population_size,
        config.max_generations,
        config.width_range,
    )
    .with_random_seed(Some(seed))
    .with_parallel(config.parallel)
    .with_verbose(config.verbose);

    let best_width = search.run()?;
    let (best_fitness, center_seed) = search
        .get_result()
        .map(|result| (result.fitness, result.center_seed))
        .ok_or(ModelError::NotFitted)?;

    // Reuse the incumbent's centers so the refit reproduces `best_fitness`
    let mut model = search.into_model();
    model.set_sigma(best_width)?;
    model.fit(
        x_train.view(),
        y_train.view(),
        &mut StdRng::seed_from_u64(center_seed),
    )?;

    let train_predictions = model.predict(x_train.view())?;
    let test_predictions = model.predict(x_test.view())?;

    let train_confusion = ConfusionMatrix::new(&train_predictions, &y_train)?;
    let test_confusion = ConfusionMatrix::new(&test_predictions, &y_test)?;

    let report = PipelineReport {
        best_width,
        best_fitness,
        train_mse: mean_squared_error(&y_train, &train_predictions)?,
        test_mse: mean_squared_error(&y_test, &test_predictions)?,
        train_accuracy: train_confusion.accuracy(),
        test_accuracy: test_confusion.accuracy(),
        test_confusion,
    };

    info!(
        best_width = report.best_width,
        train_accuracy = report.train_accuracy,
        test_accuracy = report.test_accuracy,
        "Pipeline finished"
    );

    Ok(report)
}
