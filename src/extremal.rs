//! Extremal Path Search
//!
//! Locates the cost-minimizing path per domain: a dense 1-D grid search over
//! the boundary crossing for refraction, a closed-form constant-acceleration
//! solve for mechanics. The two-path interference domain has no extremal by
//! construction.

use serde::{Deserialize, Serialize};

use crate::functional::{action, flight_time, travel_time, MechanicsParams, RefractionParams};
use crate::geometry::{Path, Point};

/// An extremal path together with its cost.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Extremal {
    pub path: Path,
    pub cost: f64,
}

/// Grid search over the boundary crossing coordinate for the least-time
/// refraction path. Returns `None` for an empty grid.
pub fn refraction_extremal(
    source: Point,
    target: Point,
    params: &RefractionParams,
    x_range: (f64, f64),
    step: f64,
) -> Option<Extremal> {
    let (x_lo, x_hi) = x_range;
    if !(step > 0.0) || x_hi < x_lo {
        return None;
    }

    let n_steps = ((x_hi - x_lo) / step).floor() as usize;
    let mut best: Option<Extremal> = None;

    for i in 0..=n_steps {
        let x = x_lo + i as f64 * step;
        let path = Path::new(vec![source, Point::new(x, params.boundary_y), target]);
        let cost = travel_time(&path, params);
        if best.as_ref().map_or(true, |b| cost < b.cost) {
            best = Some(Extremal { path, cost });
        }
    }

    best
}

/// Incidence and refraction angles (from the boundary normal) of a
/// two-segment path, in radians.
pub fn refraction_angles(path: &Path) -> (f64, f64) {
    let bend = path.points[1];
    let theta1 = (bend.x - path.source().x)
        .abs()
        .atan2((bend.y - path.source().y).abs());
    let theta2 = (path.target().x - bend.x)
        .abs()
        .atan2((path.target().y - bend.y).abs());
    (theta1, theta2)
}

/// Initial velocity components that carry a projectile from source to
/// target in exactly the clamped flight time, y-up with gravity down.
pub fn launch_velocity(source: Point, target: Point, gravity: f64) -> (f64, f64) {
    let t = flight_time(source, target, gravity);
    let vx0 = (target.x - source.x) / t;
    let vy0 = (target.y - source.y + 0.5 * gravity * t * t) / t;
    (vx0, vy0)
}

/// Closed-form classical trajectory sampled at `n + 1` uniform time steps.
/// No search is involved. Returns `None` when `n` is zero.
pub fn mechanics_extremal(
    source: Point,
    target: Point,
    params: &MechanicsParams,
    n: usize,
) -> Option<Extremal> {
    if n == 0 {
        return None;
    }

    let total_time = flight_time(source, target, params.gravity);
    let (vx0, vy0) = launch_velocity(source, target, params.gravity);

    let points = (0..=n)
        .map(|i| {
            let t = total_time * i as f64 / n as f64;
            Point::new(
                source.x + vx0 * t,
                source.y + vy0 * t - 0.5 * params.gravity * t * t,
            )
        })
        .collect();

    let path = Path::new(points);
    let cost = action(&path, params);
    Some(Extremal { path, cost })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{CurveMode, PathSampler};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_snell_law_emerges() {
        let params = RefractionParams {
            v1: 299.792,
            v2: 199.86,
            boundary_y: 300.0,
            ..RefractionParams::default()
        };
        let source = Point::new(150.0, 100.0);
        let target = Point::new(650.0, 500.0);

        let best = refraction_extremal(source, target, &params, (100.0, 700.0), 0.5).unwrap();
        let (theta1, theta2) = refraction_angles(&best.path);

        let sine_ratio = theta1.sin() / theta2.sin();
        let speed_ratio = params.v1 / params.v2;
        assert!(
            (sine_ratio - speed_ratio).abs() < 0.05,
            "sine ratio {} vs speed ratio {}",
            sine_ratio,
            speed_ratio
        );
    }

    #[test]
    fn test_refraction_empty_grid() {
        let params = RefractionParams::default();
        let s = Point::new(0.0, 0.0);
        let t = Point::new(10.0, 10.0);
        assert!(refraction_extremal(s, t, &params, (10.0, 0.0), 0.5).is_none());
        assert!(refraction_extremal(s, t, &params, (0.0, 10.0), -1.0).is_none());
    }

    #[test]
    fn test_mechanics_extremal_hits_endpoints() {
        let params = MechanicsParams::default();
        let source = Point::new(150.0, 100.0);
        let target = Point::new(650.0, 100.0);

        let ext = mechanics_extremal(source, target, &params, 200).unwrap();
        assert_eq!(ext.path.points.len(), 201);
        assert!((ext.path.source().x - source.x).abs() < 1e-9);
        assert!((ext.path.source().y - source.y).abs() < 1e-9);
        assert!((ext.path.target().x - target.x).abs() < 1e-6);
        assert!((ext.path.target().y - target.y).abs() < 1e-6);
        assert!(ext.cost.is_finite());
    }

    #[test]
    fn test_mechanics_extremal_zero_resolution() {
        let params = MechanicsParams::default();
        assert!(mechanics_extremal(Point::new(0.0, 0.0), Point::new(1.0, 0.0), &params, 0).is_none());
    }

    #[test]
    fn test_classical_path_is_local_minimum() {
        let params = MechanicsParams::default();
        let source = Point::new(150.0, 100.0);
        let target = Point::new(650.0, 100.0);

        let mut sampler = PathSampler::default();
        sampler.resolution = 200;
        sampler.sigma_max = 4.0;

        let ext = mechanics_extremal(source, target, &params, sampler.resolution).unwrap();

        let mut rng = StdRng::seed_from_u64(314);
        let neighbors = sampler.sample_curve_family(
            source,
            target,
            CurveMode::Neighborhood,
            100,
            Some(&ext.path),
            &mut rng,
        );

        let below = neighbors
            .iter()
            .filter(|p| action(p, &params) < ext.cost - 1e-9)
            .count();
        assert!(
            below <= 5,
            "{} of {} neighborhood paths beat the classical action",
            below,
            neighbors.len()
        );
    }
}
