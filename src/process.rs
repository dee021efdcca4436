//! Physical process model.
//!
//! The simulated "real" system: a linear process perturbed by process noise, and the noisy
//! measurements taken of it. Given the noise draws both are pure functions.

use rand_core::RngCore;

use crate::error::Result;
use crate::linalg::{add_vector, multiply_vector, Matrix, Vector};
use crate::noise::NoiseGenerator;

/// Advances the real state one step.
///
/// next = state_transition.prev + control.control_input + noise, where noise is drawn with the
/// standard deviations `process_noise_sd`.
pub fn advance_real<R: RngCore>(
    prev: &Vector,
    state_transition: &Matrix,
    control: &Matrix,
    control_input: &Vector,
    process_noise_sd: &Vector,
    noise: &mut NoiseGenerator<R>,
) -> Result<Vector> {
    let deterministic = add_vector(
        &multiply_vector(state_transition, prev)?,
        &multiply_vector(control, control_input)?,
    )?;
    add_vector(&deterministic, &noise.sample(process_noise_sd)?)
}

/// Measures the real state.
///
/// measured = observation.real + noise, where noise is drawn with the standard deviations
/// `measurement_noise_sd` of the real sensors.
pub fn observe_real<R: RngCore>(
    real: &Vector,
    observation: &Matrix,
    measurement_noise_sd: &Vector,
    noise: &mut NoiseGenerator<R>,
) -> Result<Vector> {
    add_vector(&multiply_vector(observation, real)?, &noise.sample(measurement_noise_sd)?)
}
