//! Test the physical process model.

use kalman_sim::linalg::{create_matrix, create_vector};
use kalman_sim::noise::NoiseGenerator;
use kalman_sim::process::{advance_real, observe_real};
use kalman_sim::{EstimateError, ModelParameters};

#[test]
fn test_advance_without_noise() {
    let p = ModelParameters::reference().unwrap();
    let mut noise = NoiseGenerator::seeded(0);
    let zero = create_vector(&[0., 0.]);

    let next = advance_real(
        &create_vector(&[2., 3.]),
        &p.state_transition,
        &p.control,
        &p.control_input(),
        &zero,
        &mut noise,
    )
    .unwrap();
    // x = x + v.t + a.t^2/2, v = v + a.t
    approx::assert_relative_eq!(next[0], 2. + 0.3 + 0.005, max_relative = 1e-12);
    approx::assert_relative_eq!(next[1], 3.1, max_relative = 1e-12);
}

#[test]
fn test_advance_is_perturbed_by_noise() {
    let p = ModelParameters::reference().unwrap();
    let prev = create_vector(&[0., 0.]);
    let sd = create_vector(&[1., 1.]);

    let mut noise = NoiseGenerator::seeded(11);
    let next = advance_real(&prev, &p.state_transition, &p.control, &p.control_input(), &sd, &mut noise).unwrap();

    let mut same = NoiseGenerator::seeded(11);
    let draw = same.sample(&sd).unwrap();
    approx::assert_relative_eq!(next[0], 0.005 + draw[0], max_relative = 1e-12);
    approx::assert_relative_eq!(next[1], 0.1 + draw[1], max_relative = 1e-12);
}

#[test]
fn test_control_input_uses_last_channel() {
    let p = ModelParameters::reference().unwrap();
    assert_eq!(p.control_input(), create_vector(&[0., 1.]));
}

#[test]
fn test_observe_real() {
    let p = ModelParameters::reference().unwrap();
    let mut noise = NoiseGenerator::seeded(0);
    let z = observe_real(&create_vector(&[5., 7.]), &p.observation, &create_vector(&[0., 0.]), &mut noise).unwrap();
    // speedometer absent
    assert_eq!(z, create_vector(&[5., 0.]));
}

#[test]
fn test_advance_shape_mismatch() {
    let p = ModelParameters::reference().unwrap();
    let mut noise = NoiseGenerator::seeded(0);
    let res = advance_real(
        &create_vector(&[1., 2., 3.]),
        &p.state_transition,
        &p.control,
        &p.control_input(),
        &create_vector(&[0., 0.]),
        &mut noise,
    );
    assert!(matches!(res, Err(EstimateError::ShapeMismatch { op: "multiply_vector", .. })));

    let bad_observation = create_matrix(1, 3, &[1., 0., 0.]).unwrap();
    assert!(observe_real(&create_vector(&[1., 2.]), &bad_observation, &create_vector(&[0.]), &mut noise).is_err());
}
