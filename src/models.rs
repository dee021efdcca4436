#![allow(non_snake_case)]

//! Linear estimation models.
//!
//! State representations are modeled as structs.
//! Common discrete system estimation operations are defined as traits.

use crate::error::Result;
use crate::linalg::{Matrix, Vector};
use crate::noise::CorrelatedNoise;

/// Kalman State.
///
/// Linear representation as a state vector and the state covariance (symmetric positive semi-definite) matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct KalmanState {
    /// State vector
    pub x: Vector,
    /// State covariance matrix (symmetric positive semi-definite)
    pub X: Matrix,
}

/// Linear prediction model.
///
/// Prediction is represented by a state transition matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearPredictModel {
    /// State transition matrix
    pub Fx: Matrix,
}

/// Linear control model.
///
/// The effect of the control input on the state.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearControlModel {
    /// Control matrix
    pub Bu: Matrix,
}

/// Linear observation model.
///
/// Observation is represented by an observation matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct LinearObserveModel {
    /// Observation matrix
    pub Hx: Matrix,
}

/// A state estimator.
pub trait Estimator {
    /// The estimator's estimate of the system's state.
    fn state(&self) -> Result<Vector>;
}

/// A Kalman estimator.
///
/// The linear Kalman state representation x,X is used to represent the system.
pub trait KalmanEstimator: Estimator {
    /// Initialise the estimator with a KalmanState.
    ///
    /// Returns the reciprocal condition number of the covariance.
    fn init(&mut self, state: &KalmanState) -> Result<f64>;

    /// The estimator's estimate of the system's KalmanState.
    fn kalman_state(&self) -> Result<KalmanState>;
}

/// A linear predictor.
///
/// Uses a linear model with additive noise.
pub trait LinearPredictor {
    /// State prediction with a linear prediction model and additive noise.
    ///
    /// `x_pred` is the already predicted state, the covariance is propagated through `pred`.
    fn predict(&mut self, pred: &LinearPredictModel, x_pred: Vector, noise: &CorrelatedNoise) -> Result<()>;
}

/// A linear observer with correlated observation noise.
///
/// Uses a linear observation model with correlated additive observation noise.
pub trait LinearObserver {
    /// Observation with the innovation `s`, the difference between the observation and the
    /// observation predicted from the current state.
    fn observe_innovation(&mut self, obs: &LinearObserveModel, noise: &CorrelatedNoise, s: &Vector) -> Result<()>;
}
