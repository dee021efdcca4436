#![allow(non_snake_case)]

//! Noise models and the noise generator.
//!
//! [`CorrelatedNoise`] is the additive noise a filter assumes, represented by its covariance.
//! [`NoiseGenerator`] produces the noise actually applied to the simulated system: independent
//! zero mean normal draws scaled by a per component standard deviation.
//!
//! Randomness is injected: the generator owns whatever [`RngCore`] it is given, so a run is
//! reproducible from its seed and independent runs need no coordination.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_core::RngCore;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{EstimateError, Result};
use crate::linalg::{Matrix, Vector};

/// Additive noise.
///
/// Noise represented as its covariance matrix.
#[derive(PartialEq, Clone, Debug)]
pub struct CorrelatedNoise {
    /// Noise covariance
    pub Q: Matrix,
}

/// Checks every standard deviation is finite and non-negative.
pub fn check_std_dev(sd: &Vector) -> Result<()> {
    match sd.iter().position(|s| !(s.is_finite() && *s >= 0.)) {
        Some(index) => Err(EstimateError::InvalidStdDev {
            index,
            value: sd[index],
        }),
        None => Ok(()),
    }
}

/// Normally distributed noise source.
pub struct NoiseGenerator<R: RngCore> {
    rng: R,
}

impl NoiseGenerator<StdRng> {
    /// A deterministic generator, identical seeds give identical draws.
    pub fn seeded(seed: u64) -> Self {
        NoiseGenerator::new(StdRng::seed_from_u64(seed))
    }

    /// A generator seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        NoiseGenerator::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> NoiseGenerator<R> {
    pub fn new(rng: R) -> Self {
        NoiseGenerator { rng }
    }

    /// Draws one value per component, independently from N(0, sd[i]^2).
    ///
    /// A zero standard deviation gives exactly zero. Each component always consumes one
    /// standard normal draw so the stream does not depend on the values of `sd`.
    pub fn sample(&mut self, sd: &Vector) -> Result<Vector> {
        check_std_dev(sd)?;
        let mut draw = Vector::zeros(sd.nrows());
        for (d, s) in draw.iter_mut().zip(sd.iter()) {
            let z: f64 = StandardNormal.sample(&mut self.rng);
            *d = s * z;
        }
        Ok(draw)
    }
}
