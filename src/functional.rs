//! Path Functionals
//!
//! Pure evaluators reducing a discretized path plus physical parameters to
//! one scalar cost: travel time (refraction), discretized Lagrangian action
//! (mechanics), or optical path length and phase (interference).
//!
//! Every evaluator returns a finite value for any geometry, including
//! coincident endpoints and zero-length segments.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::geometry::{Path, Point};

/// Smallest wave speed the travel-time functional will divide by.
const MIN_SPEED: f64 = 1e-9;
/// Flight-time clamp range, scene seconds.
const MIN_FLIGHT_TIME: f64 = 0.25;
const MAX_FLIGHT_TIME: f64 = 30.0;

/// Refraction domain parameters: wave speeds on each side of a horizontal
/// boundary, plus a display wavelength for the phase mapping.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RefractionParams {
    /// Wave speed above the boundary.
    pub v1: f64,
    /// Wave speed below the boundary.
    pub v2: f64,
    /// Height of the refracting boundary.
    pub boundary_y: f64,
    /// Wavelength in medium 1, scene units.
    pub wavelength: f64,
}

impl Default for RefractionParams {
    fn default() -> Self {
        Self {
            v1: 299.792,
            v2: 199.86, // n2 = 1.5
            boundary_y: 300.0,
            wavelength: 25.0,
        }
    }
}

/// Mechanics domain parameters. Coordinates are y-up with gravity pulling
/// toward -y; heights are measured from `ground_y`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MechanicsParams {
    pub mass: f64,
    pub gravity: f64,
    pub ground_y: f64,
    /// Action-to-phase scaling knob: smaller values sharpen the classical
    /// path's dominance in the phasor sum.
    pub effective_scale: f64,
}

impl Default for MechanicsParams {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity: 9.81,
            ground_y: 0.0,
            effective_scale: 1.0,
        }
    }
}

/// Interference domain parameters. The physical wavelength in nanometres is
/// mapped into scene units through `scale`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct InterferenceParams {
    pub wavelength_nm: f64,
    pub slit_separation: f64,
    /// Scene units per nanometre.
    pub scale: f64,
    /// Horizontal position of the slit barrier.
    pub slit_x: f64,
    /// Vertical midpoint between the two slits.
    pub slit_center_y: f64,
}

impl InterferenceParams {
    /// Wavelength in scene units.
    pub fn lambda_scaled(&self) -> f64 {
        (self.wavelength_nm * self.scale).max(f64::EPSILON)
    }
}

impl Default for InterferenceParams {
    fn default() -> Self {
        Self {
            wavelength_nm: 500.0,
            slit_separation: 100.0,
            scale: 0.05,
            slit_x: 400.0,
            slit_center_y: 300.0,
        }
    }
}

/// Travel time of a path crossing the refracting boundary: each segment
/// moves at the speed of the medium its midpoint lies in.
pub fn travel_time(path: &Path, params: &RefractionParams) -> f64 {
    let v1 = params.v1.max(MIN_SPEED);
    let v2 = params.v2.max(MIN_SPEED);

    path.points
        .windows(2)
        .map(|w| {
            let mid_y = 0.5 * (w[0].y + w[1].y);
            let v = if mid_y < params.boundary_y { v1 } else { v2 };
            w[0].distance_to(&w[1]) / v
        })
        .sum()
}

/// Clamped, monotone flight-time estimate from the endpoint separation and
/// gravity. Coincident endpoints still yield a finite, bounded duration.
pub fn flight_time(source: Point, target: Point, gravity: f64) -> f64 {
    let g = gravity.abs().max(1e-6);
    let d = source.distance_to(&target);
    (2.0 * d / g).sqrt().clamp(MIN_FLIGHT_TIME, MAX_FLIGHT_TIME)
}

/// Discretized Lagrangian action over the path's segments with the total
/// duration fixed by `flight_time`. Finite-difference velocities, midpoint
/// heights.
pub fn action(path: &Path, params: &MechanicsParams) -> f64 {
    let n = path.n_segments();
    if n == 0 {
        return 0.0;
    }

    let total_time = flight_time(path.source(), path.target(), params.gravity);
    let dt = total_time / n as f64;
    let m = params.mass;
    let g = params.gravity;

    path.points
        .windows(2)
        .map(|w| {
            let vx = (w[1].x - w[0].x) / dt;
            let vy = (w[1].y - w[0].y) / dt;
            let kinetic = 0.5 * m * (vx * vx + vy * vy);
            let height = 0.5 * (w[0].y + w[1].y) - params.ground_y;
            (kinetic - m * g * height) * dt
        })
        .sum()
}

/// Cumulative optical path length.
pub fn optical_length(path: &Path) -> f64 {
    path.total_length()
}

/// Optical phase accumulated over a given path length.
pub fn optical_phase(length: f64, params: &InterferenceParams) -> f64 {
    2.0 * PI * length / params.lambda_scaled()
}
