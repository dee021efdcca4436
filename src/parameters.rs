//! Model parameters of a simulation run.
//!
//! All parameters are constant for a run. The filter is given the *assumed* noise covariances,
//! the simulated system is perturbed with the *true* noise standard deviations; the two are
//! deliberately separate so the filter's model can differ from reality.

use crate::error::{EstimateError, Result};
use crate::linalg::{create_matrix, create_vector, Matrix, Vector};
use crate::noise::check_std_dev;

/// Time step of the reference configuration.
pub const REFERENCE_DT: f64 = 0.1;
/// Number of time steps of the reference configuration.
pub const REFERENCE_STEPS: usize = 250;

/// Constant parameters of a simulation.
///
/// `n` is the state dimension (rows of `state_transition`), `m` the observation dimension
/// (rows of `observation`).
#[derive(PartialEq, Clone, Debug)]
pub struct ModelParameters {
    /// State transition, n x n
    pub state_transition: Matrix,
    /// Effect of the control input on the state, n x n
    pub control: Matrix,
    /// Process noise covariance assumed by the filter, n x n
    pub process_noise: Matrix,
    /// Observation matrix, m x n
    pub observation: Matrix,
    /// Measurement noise covariance assumed by the filter, m x m
    pub measurement_noise: Matrix,
    /// Initial real state of the simulated system, n
    pub initial_real: Vector,
    /// Filter's initial state guess, n
    pub initial_state: Vector,
    /// Filter's initial covariance guess, n x n
    pub initial_covariance: Matrix,
    /// Standard deviation of the real process noise, n
    pub real_process_noise: Vector,
    /// Standard deviation of the real measurement noise, m
    pub real_measurement_noise: Vector,
    /// Scalar control input
    pub acceleration: f64,
    /// Number of time steps
    pub steps: usize,
}

impl ModelParameters {
    /// A car on a straight road with a gas pedal and a GPS.
    ///
    /// State is [position, velocity]. The filter's initial guess is far off on purpose.
    /// The second observation channel is an absent speedometer: it observes nothing and the
    /// filter assumes it is extremely noisy.
    pub fn reference() -> Result<ModelParameters> {
        let t = REFERENCE_DT;
        Ok(ModelParameters {
            // position integrates velocity
            state_transition: create_matrix(2, 2, &[1., t, 0., 1.])?,
            // teleportation (unused), acceleration
            control: create_matrix(2, 2, &[1., 0.5 * t * t, 0., t])?,
            process_noise: create_matrix(2, 2, &[0.01, 0.01, 0.01, 0.01])?,
            observation: create_matrix(2, 2, &[1., 0., 0., 0.])?,
            measurement_noise: create_matrix(2, 2, &[10., 0., 0., 10_000_000.])?,
            initial_real: create_vector(&[0., 0.]),
            initial_state: create_vector(&[100., 10.]),
            initial_covariance: create_matrix(2, 2, &[1., 0., 0., 1.])?,
            real_process_noise: create_vector(&[0.01, 0.01]),
            real_measurement_noise: create_vector(&[10., 10_000_000.]),
            acceleration: 1.,
            steps: REFERENCE_STEPS,
        })
    }

    /// State dimension.
    pub fn dim(&self) -> usize {
        self.state_transition.nrows()
    }

    /// Observation dimension.
    pub fn observe_dim(&self) -> usize {
        self.observation.nrows()
    }

    /// The control input vector.
    ///
    /// Zero except for the last channel, which carries the acceleration.
    pub fn control_input(&self) -> Vector {
        let mut u = Vector::zeros(self.control.ncols());
        if let Some(last) = u.iter_mut().last() {
            *last = self.acceleration;
        }
        u
    }

    /// Checks every parameter is conformant with `n` and `m`, and that the real noise
    /// standard deviations are valid.
    pub fn validate(&self) -> Result<()> {
        let n = self.dim();
        let m = self.observe_dim();

        expect_shape("state_transition", &self.state_transition, (n, n))?;
        expect_shape("control", &self.control, (n, n))?;
        expect_shape("process_noise", &self.process_noise, (n, n))?;
        expect_shape("observation", &self.observation, (m, n))?;
        expect_shape("measurement_noise", &self.measurement_noise, (m, m))?;
        expect_len("initial_real", &self.initial_real, n)?;
        expect_len("initial_state", &self.initial_state, n)?;
        expect_shape("initial_covariance", &self.initial_covariance, (n, n))?;
        expect_len("real_process_noise", &self.real_process_noise, n)?;
        expect_len("real_measurement_noise", &self.real_measurement_noise, m)?;

        check_std_dev(&self.real_process_noise)?;
        check_std_dev(&self.real_measurement_noise)
    }
}

fn expect_shape(op: &'static str, m: &Matrix, shape: (usize, usize)) -> Result<()> {
    if m.shape() == shape {
        Ok(())
    } else {
        Err(EstimateError::ShapeMismatch {
            op,
            lhs: m.shape(),
            rhs: shape,
        })
    }
}

fn expect_len(op: &'static str, v: &Vector, len: usize) -> Result<()> {
    if v.nrows() == len {
        Ok(())
    } else {
        Err(EstimateError::ShapeMismatch {
            op,
            lhs: v.shape(),
            rhs: (len, 1),
        })
    }
}
