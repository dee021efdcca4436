//! Test the noise generator and noise models.

use kalman_sim::linalg::create_vector;
use kalman_sim::noise::NoiseGenerator;
use kalman_sim::EstimateError;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_seeded_is_deterministic() {
    let sd = create_vector(&[1., 10., 0.5]);
    let mut a = NoiseGenerator::seeded(42);
    let mut b = NoiseGenerator::seeded(42);
    for _ in 0..10 {
        assert_eq!(a.sample(&sd).unwrap(), b.sample(&sd).unwrap());
    }

    let mut c = NoiseGenerator::seeded(43);
    assert_ne!(NoiseGenerator::seeded(42).sample(&sd).unwrap(), c.sample(&sd).unwrap());
}

#[test]
fn test_injected_rng() {
    let sd = create_vector(&[2., 3.]);
    let mut injected = NoiseGenerator::new(StdRng::seed_from_u64(7));
    let mut seeded = NoiseGenerator::seeded(7);
    assert_eq!(injected.sample(&sd).unwrap(), seeded.sample(&sd).unwrap());
}

#[test]
fn test_zero_std_dev_is_exactly_zero() {
    let mut gen = NoiseGenerator::seeded(1);
    let draw = gen.sample(&create_vector(&[0., 0.])).unwrap();
    assert_eq!(draw, create_vector(&[0., 0.]));
}

#[test]
fn test_invalid_std_dev() {
    let mut gen = NoiseGenerator::seeded(1);
    match gen.sample(&create_vector(&[1., -1.])) {
        Err(EstimateError::InvalidStdDev { index, value }) => {
            assert_eq!(index, 1);
            assert_eq!(value, -1.);
        }
        other => panic!("expected InvalidStdDev, got {:?}", other),
    }
    assert!(gen.sample(&create_vector(&[f64::NAN])).is_err());
    assert!(gen.sample(&create_vector(&[f64::INFINITY])).is_err());
}

#[test]
fn test_sample_statistics() {
    const N: usize = 20000;
    let sd = create_vector(&[0.5, 20.]);
    let mut gen = NoiseGenerator::seeded(2020);

    let mut sum = [0.; 2];
    let mut sum2 = [0.; 2];
    for _ in 0..N {
        let draw = gen.sample(&sd).unwrap();
        for i in 0..2 {
            sum[i] += draw[i];
            sum2[i] += draw[i] * draw[i];
        }
    }

    for i in 0..2 {
        let mean = sum[i] / N as f64;
        let std = (sum2[i] / N as f64 - mean * mean).sqrt();
        // 5 standard errors of the mean
        approx::assert_abs_diff_eq!(mean, 0., epsilon = 5. * sd[i] / (N as f64).sqrt());
        approx::assert_relative_eq!(std, sd[i], max_relative = 0.05);
    }
}
