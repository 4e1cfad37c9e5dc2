use super::rbf_network::RBFNetwork;
use crate::error::ModelError;
use crate::metric::mean_squared_error;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{ArrayView1, ArrayView2};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng, rng};
use rand_distr::Uniform;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Outcome of a completed kernel width search.
///
/// # Fields
///
/// - `width` - Kernel width of the incumbent (lowest training MSE)
/// - `fitness` - Training mean squared error of the incumbent
/// - `center_seed` - Seed of the incumbent's center selection; fitting with
///   `StdRng::seed_from_u64(center_seed)` reproduces the incumbent exactly
/// - `n_evaluated` - Number of candidates whose fitness was computed
/// - `n_failed` - Number of candidates skipped because of a numerical failure
/// - `generation_best` - Incumbent fitness at the end of each generation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub width: f64,
    pub fitness: f64,
    pub center_seed: u64,
    pub n_evaluated: usize,
    pub n_failed: usize,
    pub generation_best: Vec<f64>,
}

/// Kernel width search for [`RBFNetwork`], labelled as an Imperialist Competitive Algorithm.
///
/// Every generation draws a fresh population of `population_size` widths uniformly
/// from `width_range`, fits the network once per candidate and scores it by its mean
/// squared error on the training data. The best candidate across all generations
/// (the incumbent) is returned. There are no imperialist/colony roles: countries are
/// never assimilated, revolved or eliminated, and nothing is carried between
/// generations except the incumbent.
///
/// Ties keep the earlier candidate. A candidate whose fit fails numerically is
/// skipped; any other error aborts the run.
///
/// # Fields
///
/// - `model` - Network evaluated for each candidate width
/// - `x` - Training features
/// - `y` - Training targets
/// - `population_size` - Number of candidate widths drawn per generation
/// - `max_generations` - Number of generations
/// - `width_range` - Sampling range `(min, max)` for candidate widths
/// - `random_seed` - Optional seed making `run` reproducible
/// - `parallel` - Whether candidates of a generation are evaluated on the rayon pool
/// - `verbose` - Whether a progress bar is displayed
/// - `result` - Result of the last successful run
///
/// # Examples
/// ```rust
/// use ndarray::{Array1, Array2};
/// use rbfica::machine_learning::imperialist_competitive::ImperialistCompetitive;
/// use rbfica::machine_learning::rbf_network::RBFNetwork;
///
/// let x = Array2::from_shape_fn((20, 2), |(i, j)| ((i * 7 + j * 3) % 20) as f64 / 20.0);
/// let y = Array1::from_shape_fn(20, |i| if x[[i, 0]] < 0.5 { 1.0 } else { 0.0 });
///
/// let model = RBFNetwork::new(5, 1.0).unwrap();
/// let mut search = ImperialistCompetitive::new(model, x.view(), y.view(), 10, 3, (0.1, 5.0))
///     .with_random_seed(Some(42));
///
/// let width = search.run().unwrap();
/// assert!((0.1..=5.0).contains(&width));
/// assert_eq!(search.get_result().unwrap().n_evaluated, 30);
/// ```
#[derive(Debug, Clone)]
pub struct ImperialistCompetitive<'a> {
    model: RBFNetwork,
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, f64>,
    population_size: usize,
    max_generations: usize,
    width_range: (f64, f64),
    random_seed: Option<u64>,
    parallel: bool,
    verbose: bool,
    result: Option<SearchResult>,
}

impl<'a> ImperialistCompetitive<'a> {
    /// Creates a new search.
    ///
    /// Degenerate settings are accepted here and reported by `run`.
    ///
    /// # Parameters
    ///
    /// - `model` - Network whose kernel width is tuned; its `num_centers` is kept
    /// - `x` - Training features
    /// - `y` - Training targets aligned with `x`
    /// - `population_size` - Number of countries (candidate widths) per generation
    /// - `max_generations` - Number of generations to run
    /// - `width_range` - `(min, max)` range candidate widths are drawn from
    pub fn new(
        model: RBFNetwork,
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, f64>,
        population_size: usize,
        max_generations: usize,
        width_range: (f64, f64),
    ) -> Self {
        ImperialistCompetitive {
            model,
            x,
            y,
            population_size,
            max_generations,
            width_range,
            random_seed: None,
            parallel: false,
            verbose: false,
            result: None,
        }
    }

    /// Sets the seed used by `run`. `None` seeds from the thread-local generator.
    pub fn with_random_seed(mut self, random_seed: Option<u64>) -> Self {
        self.random_seed = random_seed;
        self
    }

    /// Evaluates each generation's candidates in parallel, each on its own clone of the model.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Shows a progress bar while the search runs.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    // Getters
    get_field!(get_population_size, population_size, usize);
    get_field!(get_max_generations, max_generations, usize);
    get_field!(get_width_range, width_range, (f64, f64));
    get_field!(get_random_seed, random_seed, Option<u64>);
    get_field!(get_parallel, parallel, bool);
    get_field!(get_verbose, verbose, bool);
    get_field_as_ref!(get_result, result, Option<&SearchResult>);

    /// Returns the network used for evaluation.
    ///
    /// After a sequential run it holds the fit of the last evaluated candidate,
    /// not the incumbent; refit it with the returned width before use.
    pub fn get_model(&self) -> &RBFNetwork {
        &self.model
    }

    /// Consumes the search and returns its network.
    pub fn into_model(self) -> RBFNetwork {
        self.model
    }

    /// Runs the search and returns the best kernel width found.
    ///
    /// Width sampling and center selection use two independent streams derived from
    /// `random_seed`: the width stream is seeded with `seed` and the center stream
    /// with `seed + 1`.
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - Kernel width with the lowest training MSE
    /// - `Err(ModelError::InvalidConfiguration)` - If the population or generation count is 0 or the width range is invalid
    /// - `Err(ModelError::NoFeasibleCandidate)` - If every candidate failed
    /// - `Err(ModelError)` - Any non-numerical error raised while fitting, e.g. `InsufficientData`
    pub fn run(&mut self) -> Result<f64, ModelError> {
        let seed = match self.random_seed {
            Some(seed) => seed,
            None => rng().next_u64(),
        };

        let mut width_rng = StdRng::seed_from_u64(seed);
        let mut center_rng = StdRng::seed_from_u64(seed.wrapping_add(1));

        self.run_with_rng(&mut width_rng, &mut center_rng)
    }

    /// Runs the search with explicitly supplied random sources.
    ///
    /// # Parameters
    ///
    /// - `width_rng` - Source for candidate widths
    /// - `center_rng` - Source for the per-candidate center selection seeds
    ///
    /// # Returns
    ///
    /// Same as [`ImperialistCompetitive::run`]
    pub fn run_with_rng<R1, R2>(
        &mut self,
        width_rng: &mut R1,
        center_rng: &mut R2,
    ) -> Result<f64, ModelError>
    where
        R1: Rng + ?Sized,
        R2: Rng + ?Sized,
    {
        self.validate_configuration()?;

        let (min_width, max_width) = self.width_range;
        let width_distribution = Uniform::new(min_width, max_width)
            .map_err(|e| ModelError::InvalidConfiguration(format!("Invalid width range: {}", e)))?;

        let x = self.x;
        let y = self.y;

        let progress_bar = if self.verbose {
            ProgressBar::new((self.population_size * self.max_generations) as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Best MSE: {msg}")
        {
            progress_bar.set_style(style.progress_chars("█▓░"));
        }
        progress_bar.set_message(format!("{:.6}", f64::INFINITY));

        let mut incumbent: Option<(f64, f64, u64)> = None;
        let mut n_evaluated = 0;
        let mut n_failed = 0;
        let mut generation_best = Vec::with_capacity(self.max_generations);

        for generation in 0..self.max_generations {
            let population: Vec<(f64, u64)> = (0..self.population_size)
                .map(|_| (width_rng.sample(&width_distribution), center_rng.next_u64()))
                .collect();

            let outcomes: Vec<Result<f64, ModelError>> = if self.parallel {
                let template = &self.model;
                population
                    .par_iter()
                    .map(|&(width, seed)| {
                        let mut model = template.clone();
                        evaluate_candidate(&mut model, x, y, width, seed)
                    })
                    .collect()
            } else {
                let model = &mut self.model;
                population
                    .iter()
                    .map(|&(width, seed)| evaluate_candidate(model, x, y, width, seed))
                    .collect()
            };

            // Reduce in enumeration order so the first minimum wins in both modes
            for (candidate, (&(width, seed), outcome)) in
                population.iter().zip(outcomes).enumerate()
            {
                match outcome {
                    Ok(fitness) => {
                        n_evaluated += 1;
                        debug!(generation, candidate, width, fitness, "Candidate evaluated");

                        if incumbent.is_none_or(|(_, best, _)| fitness < best) {
                            incumbent = Some((width, fitness, seed));
                            progress_bar.set_message(format!("{:.6}", fitness));
                        }
                    }
                    Err(e) if e.is_recoverable() => {
                        n_failed += 1;
                        warn!(generation, candidate, width, error = %e, "Candidate skipped");
                    }
                    Err(e) => {
                        progress_bar.abandon();
                        return Err(e);
                    }
                }
                progress_bar.inc(1);
            }

            let best = incumbent.map_or(f64::INFINITY, |(_, fitness, _)| fitness);
            generation_best.push(best);
            info!(generation, best_fitness = best, "Generation finished");
        }

        progress_bar.finish();

        let (width, fitness, center_seed) = incumbent.ok_or_else(|| {
            ModelError::NoFeasibleCandidate(format!(
                "all {} candidates failed",
                self.population_size * self.max_generations
            ))
        })?;

        info!(width, fitness, n_evaluated, n_failed, "Kernel width search finished");

        self.result = Some(SearchResult {
            width,
            fitness,
            center_seed,
            n_evaluated,
            n_failed,
            generation_best,
        });

        Ok(width)
    }

    /// Checks that at least one candidate can be drawn and evaluated.
    fn validate_configuration(&self) -> Result<(), ModelError> {
        if self.population_size == 0 {
            return Err(ModelError::InvalidConfiguration(
                "population_size must be greater than 0".to_string(),
            ));
        }

        if self.max_generations == 0 {
            return Err(ModelError::InvalidConfiguration(
                "max_generations must be greater than 0".to_string(),
            ));
        }

        let (min_width, max_width) = self.width_range;
        if !(min_width > 0.0 && min_width.is_finite() && max_width.is_finite()) {
            return Err(ModelError::InvalidConfiguration(format!(
                "width range must contain positive finite values, got ({}, {})",
                min_width, max_width
            )));
        }

        if min_width >= max_width {
            return Err(ModelError::InvalidConfiguration(format!(
                "width range minimum must be less than its maximum, got ({}, {})",
                min_width, max_width
            )));
        }

        Ok(())
    }
}

/// Fits `model` with the candidate width and returns its training MSE.
fn evaluate_candidate(
    model: &mut RBFNetwork,
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    width: f64,
    seed: u64,
) -> Result<f64, ModelError> {
    model.set_sigma(width)?;

    let mut rng = StdRng::seed_from_u64(seed);
    model.fit(x, y, &mut rng)?;

    let predictions = model.predict(x)?;
    let fitness = mean_squared_error(&y, &predictions)?;

    if !fitness.is_finite() {
        return Err(ModelError::NumericalError(format!(
            "fitness is not finite for width {}",
            width
        )));
    }

    Ok(fitness)
}
