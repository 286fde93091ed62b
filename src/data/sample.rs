//! Noisy samples of `sin(2πx)` on an evenly spaced grid over `[0, 1]`.

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::domain::SampleSet;
use crate::error::FitError;

/// `n` evenly spaced points from `min` to `max` inclusive.
///
/// `n == 1` yields `[min]`, `n == 0` yields an empty vector.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i + 1 == n { max } else { min + step * i as f64 })
                .collect()
        }
    }
}

/// Noise-free target `sin(2πx)` for each input.
pub fn ground_truth(x: &[f64]) -> Vec<f64> {
    x.iter().map(|&v| (2.0 * PI * v).sin()).collect()
}

/// Generate `count` training samples with Gaussian noise of standard deviation `noise_scale`.
pub fn generate_samples<R: Rng + ?Sized>(
    count: usize,
    noise_scale: f64,
    rng: &mut R,
) -> Result<SampleSet, FitError> {
    if count == 0 {
        return Err(FitError::invalid("Sample count must be > 0."));
    }
    if !(noise_scale.is_finite() && noise_scale > 0.0) {
        return Err(FitError::invalid(format!(
            "Noise scale must be finite and > 0, got {noise_scale}."
        )));
    }

    let normal = Normal::new(0.0, noise_scale)
        .map_err(|e| FitError::invalid(format!("Noise distribution error: {e}")))?;

    let x = linspace(0.0, 1.0, count);
    let mut t = ground_truth(&x);
    for v in t.iter_mut() {
        *v += normal.sample(rng);
    }

    SampleSet::new(x, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn linspace_endpoints_and_spacing() {
        let v = linspace(0.0, 1.0, 5);
        assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn same_seed_same_samples() {
        let a = generate_samples(20, 0.5, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_samples(20, 0.5, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = generate_samples(20, 0.5, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.t, c.t);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn noise_is_centred_on_the_sine() {
        let mut rng = StdRng::seed_from_u64(9);
        let samples = generate_samples(4000, 0.1, &mut rng).unwrap();
        let truth = ground_truth(&samples.x);
        let n = samples.len() as f64;
        let mean: f64 = samples.t.iter().zip(&truth).map(|(t, y)| t - y).sum::<f64>() / n;
        let var: f64 = samples
            .t
            .iter()
            .zip(&truth)
            .map(|(t, y)| (t - y - mean).powi(2))
            .sum::<f64>()
            / n;
        assert!(mean.abs() < 0.01, "mean noise {mean}");
        assert!((var.sqrt() - 0.1).abs() < 0.01, "noise std {}", var.sqrt());
    }

    #[test]
    fn rejects_bad_arguments() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_samples(0, 0.5, &mut rng).is_err());
        assert!(generate_samples(10, 0.0, &mut rng).is_err());
        assert!(generate_samples(10, f64::NAN, &mut rng).is_err());
    }
}
