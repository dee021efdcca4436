#![allow(non_snake_case)]

//! Test the numerical operations of the covariance Kalman filter.

use kalman_sim::linalg::{create_matrix, create_vector, is_symmetric, Matrix};
use kalman_sim::models::{
    Estimator, KalmanEstimator, KalmanState, LinearObserveModel, LinearObserver, LinearPredictModel, LinearPredictor,
};
use kalman_sim::noise::CorrelatedNoise;
use kalman_sim::{EstimateError, KalmanFilter, ModelParameters};

/// A one state model with constant noises.
fn simple_params() -> ModelParameters {
    let one = || create_matrix(1, 1, &[1.]).unwrap();
    ModelParameters {
        state_transition: one(),
        control: create_matrix(1, 1, &[0.]).unwrap(),
        process_noise: one(),
        observation: one(),
        measurement_noise: one(),
        initial_real: create_vector(&[10.]),
        initial_state: create_vector(&[10.]), // initialy at 10
        initial_covariance: create_matrix(1, 1, &[0.]).unwrap(), // with no uncertainty
        real_process_noise: create_vector(&[1.]),
        real_measurement_noise: create_vector(&[1.]),
        acceleration: 0.,
        steps: 1,
    }
}

#[test]
fn test_simple_predict_update() {
    let mut filter = KalmanFilter::new(&simple_params()).unwrap();

    let (x, X) = filter.predict().unwrap();
    assert_eq!(x[0], 10.);
    assert_eq!(X[(0, 0)], 1.);

    // An observation that we appear to be at 11
    let x = filter.update(&create_vector(&[11.])).unwrap();
    approx::assert_relative_eq!(x[0], 10.5, max_relative = 1e-12);
    approx::assert_relative_eq!(filter.kalman_state().X[(0, 0)], 0.5, max_relative = 1e-12);
    approx::assert_relative_eq!(filter.std_dev()[0], 0.5f64.sqrt(), max_relative = 1e-12);
    assert_eq!(filter.state().unwrap(), x);
}

#[test]
fn test_kalman_state_operations() {
    let mut state = KalmanState::new_zero(2);
    let rcond = state
        .init(&KalmanState {
            x: create_vector(&[1000., 1.5]),
            X: create_matrix(2, 2, &[4., 0., 0., 0.01]).unwrap(),
        })
        .unwrap();
    approx::assert_relative_eq!(rcond, 0.0025, max_relative = 1e-12);

    let pred = LinearPredictModel {
        Fx: create_matrix(2, 2, &[1., 0.01, 0., 1.]).unwrap(),
    };
    let noise = CorrelatedNoise {
        Q: create_matrix(2, 2, &[0., 0., 0., 0.0001]).unwrap(),
    };
    let x_pred = &pred.Fx * &state.x;
    state.predict(&pred, x_pred, &noise).unwrap();
    approx::assert_relative_eq!(state.x[0], 1000.015, max_relative = 1e-12);
    // X = Fx.X.Fx' + Q
    approx::assert_relative_eq!(state.X[(0, 0)], 4.000001, max_relative = 1e-12);
    approx::assert_relative_eq!(state.X[(0, 1)], 0.0001, max_relative = 1e-12);
    approx::assert_relative_eq!(state.X[(1, 1)], 0.0101, max_relative = 1e-12);

    let obs = LinearObserveModel {
        Hx: create_matrix(1, 2, &[1., 0.]).unwrap(),
    };
    let obs_noise = CorrelatedNoise {
        Q: create_matrix(1, 1, &[1.]).unwrap(),
    };
    state.observe_innovation(&obs, &obs_noise, &create_vector(&[-0.015])).unwrap();
    // the gain on position is X00 / (X00 + 1)
    let w = 4.000001 / 5.000001;
    approx::assert_relative_eq!(state.x[0], 1000.015 - 0.015 * w, max_relative = 1e-12);
    approx::assert_relative_eq!(state.X[(0, 0)], 4.000001 * (1. - w), max_relative = 1e-12);
    assert!(is_symmetric(&state.X, 0.));
    assert_eq!(state.kalman_state().unwrap(), state);
}

#[test]
fn test_reference_two_steps() {
    let mut filter = KalmanFilter::new(&ModelParameters::reference().unwrap()).unwrap();

    let (x, X) = filter.predict().unwrap();
    approx::assert_relative_eq!(x[0], 101.005, max_relative = 1e-12);
    approx::assert_relative_eq!(x[1], 10.1, max_relative = 1e-12);
    approx::assert_relative_eq!(X[(0, 0)], 1.02, max_relative = 1e-12);
    approx::assert_relative_eq!(X[(0, 1)], 0.11, max_relative = 1e-12);
    approx::assert_relative_eq!(X[(1, 1)], 1.01, max_relative = 1e-12);

    filter.update(&create_vector(&[1., 0.])).unwrap();
    filter.predict().unwrap();
    let x = filter.update(&create_vector(&[2., 0.])).unwrap();

    approx::assert_abs_diff_eq!(x[0], 84.679892991, epsilon = 1e-8);
    approx::assert_abs_diff_eq!(x[1], 7.459627601, epsilon = 1e-8);
    let X = filter.kalman_state().X;
    approx::assert_abs_diff_eq!(X[(0, 0)], 0.880607364, epsilon = 1e-8);
    approx::assert_abs_diff_eq!(X[(0, 1)], 0.192153547, epsilon = 1e-8);
    approx::assert_abs_diff_eq!(X[(1, 1)], 1.014853154, epsilon = 1e-8);
}

#[test]
fn test_covariance_stays_symmetric() {
    let params = ModelParameters::reference().unwrap();
    let mut filter = KalmanFilter::new(&params).unwrap();

    for i in 0..1000 {
        filter.predict().unwrap();
        filter.update(&create_vector(&[i as f64 * 0.1, 0.])).unwrap();
        let X: Matrix = filter.kalman_state().X;
        assert!(is_symmetric(&X, 0.), "asymmetric at {}: {}", i, X);
        assert!(X[(0, 0)] > 0. && X[(1, 1)] > 0.);
    }
}

#[test]
fn test_singular_innovation_covariance() {
    let mut params = ModelParameters::reference().unwrap();
    // nothing observed and no assumed measurement noise
    params.observation = create_matrix(1, 2, &[0., 0.]).unwrap();
    params.measurement_noise = create_matrix(1, 1, &[0.]).unwrap();
    params.real_measurement_noise = create_vector(&[1.]);

    let mut filter = KalmanFilter::new(&params).unwrap();
    filter.predict().unwrap();
    assert!(matches!(
        filter.update(&create_vector(&[0.])),
        Err(EstimateError::Singular { .. })
    ));
}

#[test]
fn test_init_rejects_negative_covariance() {
    let mut params = simple_params();
    params.initial_covariance = create_matrix(1, 1, &[-1.]).unwrap();
    assert!(matches!(
        KalmanFilter::new(&params),
        Err(EstimateError::NotPsd { what: "X" })
    ));
}

#[test]
fn test_update_measurement_shape() {
    let mut filter = KalmanFilter::new(&ModelParameters::reference().unwrap()).unwrap();
    filter.predict().unwrap();
    assert!(matches!(
        filter.update(&create_vector(&[1.])),
        Err(EstimateError::ShapeMismatch { .. })
    ));
}
