use super::*;

// Test default initialization of RBFNetwork
#[test]
fn test_rbf_network_default() {
    let model = RBFNetwork::default();
    assert_eq!(model.get_num_centers(), 10);
    assert_eq!(model.get_sigma(), 1.0);
    assert!(model.get_centers().is_none());
    assert!(model.get_weights().is_none());
}

#[test]
fn test_rbf_network_new_rejects_invalid_parameters() {
    assert!(matches!(
        RBFNetwork::new(0, 1.0),
        Err(ModelError::InvalidParameter(_))
    ));
    for sigma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            RBFNetwork::new(3, sigma),
            Err(ModelError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_predict_before_fit() {
    let model = RBFNetwork::new(2, 1.0).unwrap();
    let x = array![[0.0, 1.0], [1.0, 0.0]];
    assert_eq!(model.predict(x.view()), Err(ModelError::NotFitted));
    assert_eq!(model.activation_matrix(x.view()), Err(ModelError::NotFitted));
}

#[test]
fn test_fit_with_too_few_rows() {
    let (x, y) = step_dataset();
    let mut model = RBFNetwork::new(21, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let result = model.fit(x.view(), y.view(), &mut rng);
    assert!(matches!(result, Err(ModelError::InsufficientData(_))));
    assert!(model.get_centers().is_none());
}

#[test]
fn test_fit_rejects_misaligned_targets() {
    let (x, _) = step_dataset();
    let y = Array1::<f64>::zeros(19);
    let mut model = RBFNetwork::new(5, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    assert!(matches!(
        model.fit(x.view(), y.view(), &mut rng),
        Err(ModelError::ShapeMismatch(_))
    ));
}

#[test]
fn test_fit_rejects_non_finite_input() {
    let mut x = array![[0.0, 1.0], [1.0, 0.0], [0.5, 0.5]];
    x[[1, 1]] = f64::NAN;
    let y = array![0.0, 1.0, 0.0];
    let mut model = RBFNetwork::new(2, 1.0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    assert!(matches!(
        model.fit(x.view(), y.view(), &mut rng),
        Err(ModelError::InputValidationError(_))
    ));
}

// One center per sample turns the least-squares solve into exact interpolation
#[test]
fn test_fit_interpolates_when_every_row_is_a_center() {
    let x = array![
        [0.0, 0.0],
        [1.0, 0.0],
        [0.0, 1.0],
        [1.0, 1.0],
        [0.5, 0.5],
        [2.0, 1.5]
    ];
    let y = array![0.0, 1.0, 1.0, 0.0, 1.0, 0.0];
    let mut model = RBFNetwork::new(6, 0.7).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let predictions = model.fit_predict(x.view(), y.view(), &mut rng).unwrap();

    for (p, t) in predictions.iter().zip(y.iter()) {
        assert_abs_diff_eq!(*p, *t, epsilon = 1e-8);
    }
}

#[test]
fn test_centers_are_distinct_training_rows() {
    let (x, y) = step_dataset();
    let mut model = RBFNetwork::new(8, 0.5).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    model.fit(x.view(), y.view(), &mut rng).unwrap();

    let centers = model.get_centers().unwrap();
    assert_eq!(centers.dim(), (8, 2));
    assert_eq!(model.get_weights().unwrap().len(), 8);

    let mut matched_rows = Vec::new();
    for center in centers.outer_iter() {
        let row = x
            .outer_iter()
            .position(|sample| sample == center)
            .expect("every center must be a training row");
        matched_rows.push(row);
    }
    matched_rows.sort_unstable();
    matched_rows.dedup();
    assert_eq!(matched_rows.len(), 8);
}

#[test]
fn test_fit_is_reproducible_under_fixed_seed() {
    let (x, y) = step_dataset();
    let mut first = RBFNetwork::new(6, 0.4).unwrap();
    let mut second = RBFNetwork::new(6, 0.4).unwrap();

    first
        .fit(x.view(), y.view(), &mut StdRng::seed_from_u64(99))
        .unwrap();
    second
        .fit(x.view(), y.view(), &mut StdRng::seed_from_u64(99))
        .unwrap();

    assert_eq!(first.get_centers(), second.get_centers());
    assert_eq!(first.get_weights(), second.get_weights());
}

#[test]
fn test_refit_replaces_centers() {
    let (x, y) = step_dataset();
    let mut model = RBFNetwork::new(4, 0.4).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    model.fit(x.view(), y.view(), &mut rng).unwrap();
    let first_centers = model.get_centers().unwrap().clone();

    // A later draw from the same stream selects another set of centers
    let mut replaced = false;
    for _ in 0..5 {
        model.fit(x.view(), y.view(), &mut rng).unwrap();
        if *model.get_centers().unwrap() != first_centers {
            replaced = true;
            break;
        }
    }
    assert!(replaced);
    assert_eq!(model.get_centers().unwrap().nrows(), 4);
}

#[test]
fn test_failed_fit_clears_previous_state() {
    let (x, y) = step_dataset();
    let mut model = RBFNetwork::new(5, 0.5).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    model.fit(x.view(), y.view(), &mut rng).unwrap();

    let small_x = x.slice(s![..3, ..]);
    let small_y = y.slice(s![..3]);
    assert!(model.fit(small_x, small_y, &mut rng).is_err());
    assert_eq!(model.predict(x.view()), Err(ModelError::NotFitted));
}

#[test]
fn test_predict_feature_mismatch() {
    let (x, y) = step_dataset();
    let mut model = RBFNetwork::new(5, 0.5).unwrap();
    model
        .fit(x.view(), y.view(), &mut StdRng::seed_from_u64(2))
        .unwrap();

    let wrong = Array2::<f64>::zeros((3, 3));
    assert!(matches!(
        model.predict(wrong.view()),
        Err(ModelError::ShapeMismatch(_))
    ));
}

#[test]
fn test_set_sigma() {
    let mut model = RBFNetwork::new(5, 0.5).unwrap();
    model.set_sigma(2.5).unwrap();
    assert_eq!(model.get_sigma(), 2.5);

    assert!(matches!(
        model.set_sigma(0.0),
        Err(ModelError::InvalidParameter(_))
    ));
    assert_eq!(model.get_sigma(), 2.5);
}

#[test]
fn test_activation_matrix_values() {
    let x = array![[0.0, 0.0], [3.0, 4.0]];
    let centers = array![[0.0, 0.0], [3.0, 4.0], [0.0, 1.0]];

    let g = activation_matrix(x.view(), centers.view(), 5.0).unwrap();

    assert_eq!(g.dim(), (2, 3));
    assert_abs_diff_eq!(g[[0, 0]], 1.0);
    assert_abs_diff_eq!(g[[1, 1]], 1.0);
    // ||(0,0) - (3,4)||^2 = 25, 2 * sigma^2 = 50
    assert_abs_diff_eq!(g[[0, 1]], (-0.5f64).exp(), epsilon = 1e-12);
    assert_abs_diff_eq!(g[[1, 0]], (-0.5f64).exp(), epsilon = 1e-12);
    // ||(3,4) - (0,1)||^2 = 18
    assert_abs_diff_eq!(g[[1, 2]], (-18.0f64 / 50.0).exp(), epsilon = 1e-12);
}

#[test]
fn test_activation_matrix_large_input_matches_sequential_values() {
    let x = Array2::from_shape_fn((1200, 3), |(i, j)| ((i * 31 + j * 7) % 97) as f64 / 97.0);
    let centers = x.slice(s![..4, ..]).to_owned();

    let g = activation_matrix(x.view(), centers.view(), 0.8).unwrap();
    assert_eq!(g.dim(), (1200, 4));

    for i in [0, 599, 1000, 1199] {
        for j in 0..4 {
            let expected =
                crate::math::gaussian_kernel(&x.row(i), &centers.row(j), 0.8).unwrap();
            assert_abs_diff_eq!(g[[i, j]], expected, epsilon = 1e-15);
        }
    }
}

#[test]
fn test_activation_matrix_shape_mismatch() {
    let x = Array2::<f64>::zeros((4, 2));
    let centers = Array2::<f64>::zeros((2, 3));
    assert!(matches!(
        activation_matrix(x.view(), centers.view(), 1.0),
        Err(ModelError::ShapeMismatch(_))
    ));
}

#[test]
fn test_score_matches_mean_squared_error() {
    let (x, y) = step_dataset();
    let mut model = RBFNetwork::new(6, 0.3).unwrap();
    model
        .fit(x.view(), y.view(), &mut StdRng::seed_from_u64(8))
        .unwrap();

    let predictions = model.predict(x.view()).unwrap();
    let expected = mean_squared_error(&y, &predictions).unwrap();
    assert_abs_diff_eq!(model.score(x.view(), y.view()).unwrap(), expected);
}

#[test]
fn test_constant_targets_with_wide_kernel() {
    let (x, _) = step_dataset();
    let y = Array1::from_elem(20, 1.0);
    let mut model = RBFNetwork::new(5, 3.0).unwrap();

    let predictions = model
        .fit_predict(x.view(), y.view(), &mut StdRng::seed_from_u64(4))
        .unwrap();

    for p in predictions.iter() {
        assert_abs_diff_eq!(*p, 1.0, epsilon = 1e-2);
    }
}
