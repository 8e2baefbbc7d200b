//! Phasor Aggregation
//!
//! Maps each candidate's cost to a phase angle relative to the minimum cost
//! and sums the resulting unit complex amplitudes into an interference
//! result. Near the extremal path costs vary slowly, so those phasors align;
//! far from it they spin rapidly and cancel.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Scale substituted when the configured phase scale is unusable.
const FALLBACK_SCALE: f64 = 1.0;

/// One path's cost mapped to a phase and unit amplitude.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PhasorSample {
    pub phase: f64,
    pub amplitude: Complex64,
}

/// Vector sum of all phasor samples.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InterferenceResult {
    pub re: f64,
    pub im: f64,
    pub magnitude: f64,
    /// Magnitude divided by the sample count: 1.0 is full coherence.
    pub normalized_magnitude: f64,
    pub angle: f64,
}

impl InterferenceResult {
    /// Empty-sum result.
    pub fn zero() -> Self {
        Self {
            re: 0.0,
            im: 0.0,
            magnitude: 0.0,
            normalized_magnitude: 0.0,
            angle: 0.0,
        }
    }

    /// Detected intensity, |sum|^2.
    pub fn intensity(&self) -> f64 {
        self.magnitude * self.magnitude
    }
}

/// Map costs to phases with `phi = (cost - cost_min) / phase_scale` and sum
/// the unit phasors. A non-positive or non-finite scale, or a zero cost
/// spread, falls back to a constant scale so every phase collapses to zero
/// (fully constructive).
pub fn aggregate(costs: &[f64], phase_scale: f64) -> (Vec<PhasorSample>, InterferenceResult) {
    if costs.is_empty() {
        return (Vec::new(), InterferenceResult::zero());
    }

    let cost_min = costs.iter().cloned().fold(f64::INFINITY, f64::min);
    let cost_max = costs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let spread = cost_max - cost_min;

    let scale = if phase_scale.is_finite() && phase_scale > f64::EPSILON && spread > f64::EPSILON {
        phase_scale
    } else {
        FALLBACK_SCALE
    };

    let samples: Vec<PhasorSample> = costs
        .iter()
        .map(|&cost| {
            let phase = if spread > f64::EPSILON {
                (cost - cost_min) / scale
            } else {
                0.0
            };
            PhasorSample {
                phase,
                amplitude: Complex64::from_polar(1.0, phase),
            }
        })
        .collect();

    let sum: Complex64 = samples.iter().map(|s| s.amplitude).sum();
    let result = InterferenceResult {
        re: sum.re,
        im: sum.im,
        magnitude: sum.norm(),
        normalized_magnitude: sum.norm() / samples.len() as f64,
        angle: sum.arg(),
    };

    (samples, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn test_empty_costs() {
        let (samples, result) = aggregate(&[], 1.0);
        assert!(samples.is_empty());
        assert_eq!(result.magnitude, 0.0);
        assert!(result.angle.is_finite());
    }

    #[test]
    fn test_equal_costs_fully_constructive() {
        let costs = vec![7.5; 40];
        let (samples, result) = aggregate(&costs, 0.01);
        for s in &samples {
            assert_eq!(s.phase, 0.0);
        }
        assert!((result.magnitude - 40.0).abs() < 1e-9);
        assert!((result.normalized_magnitude - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_does_not_divide_by_zero() {
        let costs = [1.0, 2.0, 3.0];
        let (samples, result) = aggregate(&costs, 0.0);
        for s in &samples {
            assert!(s.phase.is_finite());
        }
        assert!(result.magnitude.is_finite());
    }

    #[test]
    fn test_two_phasor_interference_law() {
        // Two unit phasors with phase difference d sum to 2 + 2 cos d.
        for k in 0..12 {
            let delta = k as f64 * PI / 6.0;
            let (_, result) = aggregate(&[0.0, delta], 1.0);
            let expected = 2.0 + 2.0 * delta.cos();
            assert!(
                (result.intensity() - expected).abs() < 1e-9,
                "delta {}: {} vs {}",
                delta,
                result.intensity(),
                expected
            );
        }
    }

    #[test]
    fn test_random_phase_cancellation_decays() {
        let mut rng = StdRng::seed_from_u64(2026);
        let trials = 40;

        let mean_normalized = |n: usize, rng: &mut StdRng| {
            let mut total = 0.0;
            for _ in 0..trials {
                let costs: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1000.0)).collect();
                let (_, result) = aggregate(&costs, 1.0);
                total += result.normalized_magnitude;
            }
            total / trials as f64
        };

        let small = mean_normalized(16, &mut rng);
        let medium = mean_normalized(64, &mut rng);
        let large = mean_normalized(256, &mut rng);

        assert!(small > medium, "{} vs {}", small, medium);
        assert!(medium > large, "{} vs {}", medium, large);
    }
}
