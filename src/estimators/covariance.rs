#![allow(non_snake_case)]

//! Covariance state estimation.
//!
//! A discrete Bayesian estimator that uses a Kalman state representation [`KalmanState`] of the system for estimation.
//! The Kalman state is simply the x,X pair the dimensions of both are the dimensions of the system.
//!
//! [`KalmanFilter`] binds a `KalmanState` to the constant models of one run and cycles it through
//! predict and update once per time step.
//!
//! [`KalmanState`]: ../../models/struct.KalmanState.html

use crate::error::{EstimateError, Result};
use crate::linalg::rcond::rcond_symmetric;
use crate::linalg::{
    add, add_vector, identity, invert, multiply, multiply_vector, sub_vector, subtract, symmetrize, transpose, Matrix, Vector,
};
use crate::matrix::{check_non_negativ, prod_spd};
use crate::models::{
    Estimator, KalmanEstimator, KalmanState, LinearControlModel, LinearObserveModel, LinearObserver,
    LinearPredictModel, LinearPredictor,
};
use crate::noise::CorrelatedNoise;
use crate::parameters::ModelParameters;

impl KalmanState {
    pub fn new_zero(d: usize) -> KalmanState {
        KalmanState {
            x: Vector::zeros(d),
            X: Matrix::zeros(d, d),
        }
    }

    /// Standard deviation of each state component, sqrt(diagonal(X)).
    pub fn std_dev(&self) -> Vector {
        self.X.diagonal().map(|v| v.sqrt())
    }
}

impl Estimator for KalmanState {
    fn state(&self) -> Result<Vector> {
        Ok(self.x.clone())
    }
}

impl KalmanEstimator for KalmanState {
    fn init(&mut self, state: &KalmanState) -> Result<f64> {
        if !state.X.is_square() || state.X.nrows() != state.x.nrows() {
            return Err(EstimateError::ShapeMismatch {
                op: "init",
                lhs: state.x.shape(),
                rhs: state.X.shape(),
            });
        }
        let rcond = rcond_symmetric(&state.X);
        check_non_negativ(rcond, "X")?;

        self.x = state.x.clone();
        self.X = state.X.clone();
        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<KalmanState> {
        Ok(self.clone())
    }
}

impl LinearPredictor for KalmanState {
    fn predict(&mut self, pred: &LinearPredictModel, x_pred: Vector, noise: &CorrelatedNoise) -> Result<()> {
        // X = Fx.X.Fx' + Q
        let X = add(&prod_spd(&pred.Fx, &self.X)?, &noise.Q)?;
        if x_pred.nrows() != X.nrows() {
            return Err(EstimateError::ShapeMismatch {
                op: "predict",
                lhs: x_pred.shape(),
                rhs: X.shape(),
            });
        }

        self.x = x_pred;
        self.X = X;
        Ok(())
    }
}

impl LinearObserver for KalmanState {
    fn observe_innovation(&mut self, obs: &LinearObserveModel, noise: &CorrelatedNoise, s: &Vector) -> Result<()> {
        let XHt = multiply(&self.X, &transpose(&obs.Hx))?;
        // S = Hx.X.Hx' + Z
        let S = add(&multiply(&obs.Hx, &XHt)?, &noise.Q)?;

        // Kalman gain, X.Hx'.inv(S)
        let W = multiply(&XHt, &invert(&S)?)?;

        // State update
        self.x = add_vector(&self.x, &multiply_vector(&W, s)?)?;
        // X = (I - W.Hx).X, symmetrised as rounding lets it drift
        let IWH = subtract(&identity(self.X.nrows()), &multiply(&W, &obs.Hx)?)?;
        self.X = symmetrize(&multiply(&IWH, &self.X)?)?;

        Ok(())
    }
}

/// A linear Kalman filter.
///
/// Owns its running estimate and the constant models it was built with. The estimate is only
/// changed through [`predict`](KalmanFilter::predict) and [`update`](KalmanFilter::update).
#[derive(Clone, Debug)]
pub struct KalmanFilter {
    state: KalmanState,
    pred: LinearPredictModel,
    control: LinearControlModel,
    u: Vector,
    process_noise: CorrelatedNoise,
    obs: LinearObserveModel,
    obs_noise: CorrelatedNoise,
}

impl KalmanFilter {
    /// Builds a filter from the model parameters, initialised with the initial state and
    /// covariance guesses.
    pub fn new(params: &ModelParameters) -> Result<KalmanFilter> {
        params.validate()?;

        let mut state = KalmanState::new_zero(params.dim());
        let rcond = state.init(&KalmanState {
            x: params.initial_state.clone(),
            X: params.initial_covariance.clone(),
        })?;
        log::debug!("filter initialised x={:?} rcond(X)={:e}", state.x.as_slice(), rcond);

        Ok(KalmanFilter {
            state,
            pred: LinearPredictModel {
                Fx: params.state_transition.clone(),
            },
            control: LinearControlModel {
                Bu: params.control.clone(),
            },
            u: params.control_input(),
            process_noise: CorrelatedNoise {
                Q: params.process_noise.clone(),
            },
            obs: LinearObserveModel {
                Hx: params.observation.clone(),
            },
            obs_noise: CorrelatedNoise {
                Q: params.measurement_noise.clone(),
            },
        })
    }

    /// Predicts the next state, x = Fx.x + Bu.u and X = Fx.X.Fx' + Q.
    ///
    /// Returns the predicted state and covariance.
    pub fn predict(&mut self) -> Result<(Vector, Matrix)> {
        let x_pred = add_vector(
            &multiply_vector(&self.pred.Fx, &self.state.x)?,
            &multiply_vector(&self.control.Bu, &self.u)?,
        )?;
        self.state.predict(&self.pred, x_pred, &self.process_noise)?;

        Ok((self.state.x.clone(), self.state.X.clone()))
    }

    /// Updates the predicted state with the measurement `z`.
    ///
    /// Returns the new state estimate. Fails with [`EstimateError::Singular`] if the innovation
    /// covariance can not be inverted.
    pub fn update(&mut self, z: &Vector) -> Result<Vector> {
        let s = sub_vector(z, &multiply_vector(&self.obs.Hx, &self.state.x)?)?;
        self.state.observe_innovation(&self.obs, &self.obs_noise, &s)?;

        Ok(self.state.x.clone())
    }

    pub fn kalman_state(&self) -> KalmanState {
        self.state.clone()
    }

    pub fn std_dev(&self) -> Vector {
        self.state.std_dev()
    }
}

impl Estimator for KalmanFilter {
    fn state(&self) -> Result<Vector> {
        self.state.state()
    }
}
