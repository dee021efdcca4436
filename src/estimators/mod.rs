//! State estimators.

pub mod covariance;
