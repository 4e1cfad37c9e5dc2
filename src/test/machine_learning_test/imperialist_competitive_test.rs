use super::*;

fn search_on<'a>(
    x: &'a Array2<f64>,
    y: &'a Array1<f64>,
    population_size: usize,
    max_generations: usize,
) -> ImperialistCompetitive<'a> {
    ImperialistCompetitive::new(
        RBFNetwork::new(5, 1.0).unwrap(),
        x.view(),
        y.view(),
        population_size,
        max_generations,
        (0.1, 5.0),
    )
    .with_random_seed(Some(42))
}

#[test]
fn test_new_and_getters() {
    let (x, y) = step_dataset();
    let search = search_on(&x, &y, 10, 3)
        .with_parallel(true)
        .with_verbose(false);

    assert_eq!(search.get_population_size(), 10);
    assert_eq!(search.get_max_generations(), 3);
    assert_eq!(search.get_width_range(), (0.1, 5.0));
    assert_eq!(search.get_random_seed(), Some(42));
    assert!(search.get_parallel());
    assert!(!search.get_verbose());
    assert!(search.get_result().is_none());
    assert_eq!(search.get_model().get_num_centers(), 5);
}

#[test]
fn test_zero_generations_is_invalid() {
    let (x, y) = step_dataset();
    let mut search = search_on(&x, &y, 10, 0);
    assert!(matches!(
        search.run(),
        Err(ModelError::InvalidConfiguration(_))
    ));
    assert!(search.get_result().is_none());
}

#[test]
fn test_zero_population_is_invalid() {
    let (x, y) = step_dataset();
    let mut search = search_on(&x, &y, 0, 3);
    assert!(matches!(
        search.run(),
        Err(ModelError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_invalid_width_ranges() {
    let (x, y) = step_dataset();
    for range in [
        (0.0, 1.0),
        (-1.0, 1.0),
        (2.0, 1.0),
        (1.0, 1.0),
        (0.1, f64::INFINITY),
        (f64::NAN, 1.0),
    ] {
        let mut search = ImperialistCompetitive::new(
            RBFNetwork::new(5, 1.0).unwrap(),
            x.view(),
            y.view(),
            4,
            2,
            range,
        );
        assert!(
            matches!(search.run(), Err(ModelError::InvalidConfiguration(_))),
            "range {:?} should be rejected",
            range
        );
    }
}

// 20 rows, 2 features, target = 1 iff feature0 < 0.5
#[test]
fn test_step_scenario_beats_flat_kernel() {
    let (x, y) = step_dataset();
    let mut search = search_on(&x, &y, 10, 3);

    let width = search.run().unwrap();
    assert!((0.1..=5.0).contains(&width));

    let result = search.get_result().unwrap().clone();
    assert_eq!(result.width, width);
    assert_eq!(result.n_evaluated + result.n_failed, 30);
    assert_eq!(result.generation_best.len(), 3);

    // The incumbent's center seed reproduces its fit exactly
    let mut tuned = RBFNetwork::new(5, width).unwrap();
    tuned
        .fit(
            x.view(),
            y.view(),
            &mut StdRng::seed_from_u64(result.center_seed),
        )
        .unwrap();
    let tuned_mse = tuned.score(x.view(), y.view()).unwrap();
    assert_abs_diff_eq!(tuned_mse, result.fitness, epsilon = 1e-12);

    let mut flat = RBFNetwork::new(5, 1000.0).unwrap();
    flat.fit(
        x.view(),
        y.view(),
        &mut StdRng::seed_from_u64(result.center_seed),
    )
    .unwrap();
    let flat_mse = flat.score(x.view(), y.view()).unwrap();

    assert!(
        tuned_mse < flat_mse,
        "tuned MSE {} should be below flat-kernel MSE {}",
        tuned_mse,
        flat_mse
    );
}

#[test]
fn test_generation_best_is_non_increasing() {
    let (x, y) = step_dataset();
    let mut search = search_on(&x, &y, 6, 5);
    search.run().unwrap();

    let history = &search.get_result().unwrap().generation_best;
    assert_eq!(history.len(), 5);
    for pair in history.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert_eq!(*history.last().unwrap(), search.get_result().unwrap().fitness);
}

#[test]
fn test_more_generations_never_worsen_fitness() {
    let (x, y) = step_dataset();
    let mut previous = f64::INFINITY;

    for generations in 1..=4 {
        let mut search = search_on(&x, &y, 5, generations);
        search.run().unwrap();
        let fitness = search.get_result().unwrap().fitness;
        assert!(fitness <= previous);
        previous = fitness;
    }
}

#[test]
fn test_larger_single_population_never_worsens_fitness() {
    let (x, y) = step_dataset();
    let mut previous = f64::INFINITY;

    for population in [1, 3, 6, 12] {
        let mut search = search_on(&x, &y, population, 1);
        search.run().unwrap();
        let fitness = search.get_result().unwrap().fitness;
        assert!(fitness <= previous);
        previous = fitness;
    }
}

#[test]
fn test_run_is_reproducible_with_seed() {
    let (x, y) = step_dataset();
    let mut first = search_on(&x, &y, 6, 2);
    let mut second = search_on(&x, &y, 6, 2);

    assert_eq!(first.run().unwrap(), second.run().unwrap());
    assert_eq!(first.get_result(), second.get_result());
}

#[test]
fn test_parallel_matches_sequential() {
    let (x, y) = step_dataset();
    let mut sequential = search_on(&x, &y, 8, 3);
    let mut parallel = search_on(&x, &y, 8, 3).with_parallel(true);

    let sequential_width = sequential.run().unwrap();
    let parallel_width = parallel.run().unwrap();

    assert_eq!(sequential_width, parallel_width);
    assert_eq!(sequential.get_result(), parallel.get_result());
}

#[test]
fn test_run_with_explicit_rngs() {
    let (x, y) = step_dataset();
    let mut from_seed = search_on(&x, &y, 4, 2);
    let mut explicit = search_on(&x, &y, 4, 2);

    let seeded_width = from_seed.run().unwrap();
    let explicit_width = explicit
        .run_with_rng(&mut StdRng::seed_from_u64(42), &mut StdRng::seed_from_u64(43))
        .unwrap();

    assert_eq!(seeded_width, explicit_width);
}

#[test]
fn test_constant_targets_terminate_with_small_fitness() {
    let (x, _) = step_dataset();
    let y = Array1::from_elem(20, 1.0);
    let mut search = search_on(&x, &y, 10, 3);

    let width = search.run().unwrap();
    assert!((0.1..=5.0).contains(&width));
    assert!(search.get_result().unwrap().fitness < 1e-3);
}

#[test]
fn test_insufficient_data_is_not_skipped() {
    let (x, y) = step_dataset();
    let mut search = ImperialistCompetitive::new(
        RBFNetwork::new(25, 1.0).unwrap(),
        x.view(),
        y.view(),
        4,
        2,
        (0.1, 5.0),
    );
    assert!(matches!(
        search.run(),
        Err(ModelError::InsufficientData(_))
    ));
}

// Off-center activations underflow to zero, so every non-center row is predicted as 0
// and its squared error against 1e200 overflows
#[test]
fn test_all_candidates_failing_reports_no_feasible_candidate() {
    let x = Array2::from_shape_fn((10, 1), |(i, _)| i as f64);
    let y = Array1::from_elem(10, 1e200);
    let mut search = ImperialistCompetitive::new(
        RBFNetwork::new(3, 1.0).unwrap(),
        x.view(),
        y.view(),
        4,
        2,
        (1e-3, 1e-2),
    )
    .with_random_seed(Some(0));

    assert!(matches!(
        search.run(),
        Err(ModelError::NoFeasibleCandidate(_))
    ));
    assert!(search.get_result().is_none());
}

#[test]
fn test_into_model_keeps_center_count() {
    let (x, y) = step_dataset();
    let mut search = search_on(&x, &y, 3, 1);
    let width = search.run().unwrap();

    let mut model = search.into_model();
    assert_eq!(model.get_num_centers(), 5);
    model.set_sigma(width).unwrap();
    model
        .fit(x.view(), y.view(), &mut StdRng::seed_from_u64(1))
        .unwrap();
    // Least squares never does worse than the all-zero weights, whose MSE is mean(y^2)
    let mse = mean_squared_error(&y, &model.predict(x.view()).unwrap()).unwrap();
    assert!(mse <= y.mapv(|v| v * v).mean().unwrap() + 1e-12);
}

/// Replays the (width, center seed) pairs a search draws from the given streams.
fn replay_population(
    mut width_rng: StdRng,
    mut center_rng: StdRng,
    n_candidates: usize,
    width_range: (f64, f64),
) -> Vec<(f64, u64)> {
    use rand::{Rng, RngCore};
    use rand_distr::Uniform;

    let distribution = Uniform::new(width_range.0, width_range.1).unwrap();
    (0..n_candidates)
        .map(|_| (width_rng.sample(&distribution), center_rng.next_u64()))
        .collect()
}

// With widths this narrow the activation matrix is an exact 0/1 selection of the
// single center. Only a center on row 0 fits the 1e160 target; any other center
// leaves a 1e160 residual whose square overflows.
fn spike_dataset() -> (Array2<f64>, Array1<f64>) {
    let x = array![[0.0], [1.0], [2.0], [3.0]];
    let y = array![1e160, 0.0, 0.0, 0.0];
    (x, y)
}

#[test]
fn test_failed_candidates_are_skipped() {
    let (x, y) = spike_dataset();
    let width_range = (1e-3, 1e-2);
    let width_rng = StdRng::seed_from_u64(17);
    let center_rng = StdRng::seed_from_u64(18);

    let mut search = ImperialistCompetitive::new(
        RBFNetwork::new(1, 1.0).unwrap(),
        x.view(),
        y.view(),
        20,
        3,
        width_range,
    );
    let width = search
        .run_with_rng(&mut width_rng.clone(), &mut center_rng.clone())
        .unwrap();

    let result = search.get_result().unwrap();
    assert!(result.n_failed > 0);
    assert!(result.n_evaluated > 0);
    assert_eq!(result.n_evaluated + result.n_failed, 60);
    assert!(result.fitness.is_finite());

    // Successful candidates share the same activation matrix and therefore the
    // same fitness, so the first one is kept
    let succeeded: Vec<(f64, u64)> = replay_population(width_rng, center_rng, 60, width_range)
        .into_iter()
        .filter(|&(w, seed)| {
            let mut model = RBFNetwork::new(1, w).unwrap();
            model
                .fit(x.view(), y.view(), &mut StdRng::seed_from_u64(seed))
                .unwrap();
            model.get_centers().unwrap()[[0, 0]] == 0.0
        })
        .collect();

    assert_eq!(succeeded.len(), result.n_evaluated);
    assert_eq!((width, result.center_seed), succeeded[0]);
}

#[test]
fn test_failed_candidates_are_skipped_in_parallel() {
    let (x, y) = spike_dataset();
    let build = |parallel| {
        ImperialistCompetitive::new(
            RBFNetwork::new(1, 1.0).unwrap(),
            x.view(),
            y.view(),
            20,
            3,
            (1e-3, 1e-2),
        )
        .with_random_seed(Some(5))
        .with_parallel(parallel)
    };

    let mut sequential = build(false);
    let mut parallel = build(true);
    sequential.run().unwrap();
    parallel.run().unwrap();

    assert!(parallel.get_result().unwrap().n_failed > 0);
    assert_eq!(sequential.get_result(), parallel.get_result());
}

// Zero targets give every candidate a fitness of exactly 0.0
#[test]
fn test_ties_keep_the_first_candidate() {
    let (x, _) = step_dataset();
    let y = Array1::<f64>::zeros(20);
    let width_range = (0.1, 5.0);
    let width_rng = StdRng::seed_from_u64(3);
    let center_rng = StdRng::seed_from_u64(4);

    for parallel in [false, true] {
        let mut search = ImperialistCompetitive::new(
            RBFNetwork::new(5, 1.0).unwrap(),
            x.view(),
            y.view(),
            5,
            2,
            width_range,
        )
        .with_parallel(parallel);
        let width = search
            .run_with_rng(&mut width_rng.clone(), &mut center_rng.clone())
            .unwrap();

        let result = search.get_result().unwrap();
        assert_eq!(result.n_evaluated, 10);
        assert_eq!(result.generation_best, vec![0.0, 0.0]);

        let first = replay_population(width_rng.clone(), center_rng.clone(), 1, width_range)[0];
        assert_eq!((width, result.center_seed), first);
    }
}
