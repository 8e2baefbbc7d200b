//! Simulation State and Recomputation
//!
//! Owns the current endpoints, domain parameters and sampling configuration,
//! and turns every parameter change into a complete, self-contained
//! `EngineSnapshot`: sample candidates, score them, locate the extremal path,
//! aggregate the phasors. The snapshot is read-only and safe for a renderer
//! to retain across frames.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;

use crate::extremal::{
    launch_velocity, mechanics_extremal, refraction_angles, refraction_extremal,
};
use crate::functional::{
    action, flight_time, optical_length, optical_phase, travel_time, InterferenceParams,
    MechanicsParams, RefractionParams,
};
use crate::geometry::{Path, Point, SceneBounds};
use crate::phasor::{aggregate, InterferenceResult, PhasorSample};
use crate::sampler::{CurveMode, PathSampler};

/// Grid resolution for the refraction extremal search, scene units.
const BOUNDARY_SEARCH_STEP: f64 = 0.5;

/// Active physical domain with its parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Domain {
    Refraction(RefractionParams),
    Mechanics(MechanicsParams),
    Interference(InterferenceParams),
}

impl Domain {
    /// Domain-specific scalar cost of a path: travel time, action, or
    /// optical path length.
    pub fn cost(&self, path: &Path) -> f64 {
        match self {
            Domain::Refraction(p) => travel_time(path, p),
            Domain::Mechanics(p) => action(path, p),
            Domain::Interference(_) => optical_length(path),
        }
    }

    /// Cost-to-phase scale. Wavelength-derived for refraction and
    /// interference; the adjustable effective scale for mechanics.
    pub fn phase_scale(&self) -> f64 {
        match self {
            Domain::Refraction(p) => p.wavelength / (2.0 * PI * p.v1.max(f64::EPSILON)),
            Domain::Mechanics(p) => p.effective_scale,
            Domain::Interference(p) => p.lambda_scaled() / (2.0 * PI),
        }
    }
}

/// Candidate generation configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub mode: CurveMode,
    pub count: usize,
    pub seed: u64,
    pub sigma_max: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            mode: CurveMode::Spray,
            count: 60,
            seed: 0,
            sigma_max: 4.0,
        }
    }
}

/// A scored candidate path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Candidate {
    pub path: Path,
    pub cost: f64,
}

/// Per-domain diagnostic scalars for display.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum Diagnostics {
    Refraction {
        /// Incidence angle from the boundary normal, radians.
        incidence: f64,
        /// Refraction angle from the boundary normal, radians.
        refraction: f64,
        /// sin(incidence) / sin(refraction); approaches v1/v2 at the optimum.
        sine_ratio: f64,
    },
    Mechanics {
        flight_time: f64,
        vx0: f64,
        vy0: f64,
    },
    Interference {
        length_a: f64,
        length_b: f64,
        delta_phase: f64,
    },
}

/// Read-only output of one recomputation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Candidates sorted by cost ascending.
    pub candidates: Vec<Candidate>,
    pub extremal: Option<Candidate>,
    /// One phasor per candidate, in candidate order.
    pub phasors: Vec<PhasorSample>,
    pub interference: InterferenceResult,
    pub diagnostics: Option<Diagnostics>,
}

impl EngineSnapshot {
    fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            extremal: None,
            phasors: Vec::new(),
            interference: InterferenceResult::zero(),
            diagnostics: None,
        }
    }
}

/// Mutable simulation state, one per demo. Setters mutate and immediately
/// recompute so a renderer never observes a stale combination of parameters
/// and results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationState {
    pub source: Point,
    pub target: Point,
    pub domain: Domain,
    pub sampling: SamplingConfig,
    pub bounds: SceneBounds,
    /// Segments per curve-family path.
    pub resolution: usize,
}

impl SimulationState {
    /// Create a state with default endpoints for the given domain.
    pub fn new(domain: Domain) -> Self {
        Self {
            source: Point::new(150.0, 100.0),
            target: Point::new(650.0, 500.0),
            domain,
            sampling: SamplingConfig::default(),
            bounds: SceneBounds::default(),
            resolution: 100,
        }
    }

    /// Move the endpoints and recompute.
    pub fn set_endpoints(&mut self, source: Point, target: Point) -> EngineSnapshot {
        self.source = source;
        self.target = target;
        self.recompute()
    }

    /// Replace the domain parameters and recompute.
    pub fn set_domain(&mut self, domain: Domain) -> EngineSnapshot {
        self.domain = domain;
        self.recompute()
    }

    /// Replace the sampling configuration and recompute.
    pub fn set_sampling(&mut self, sampling: SamplingConfig) -> EngineSnapshot {
        self.sampling = sampling;
        self.recompute()
    }

    /// Run the full pipeline: sample, score, extremize, aggregate.
    pub fn recompute(&self) -> EngineSnapshot {
        let mut sampler = PathSampler::new(self.bounds);
        sampler.resolution = self.resolution.max(1);
        sampler.sigma_max = self.sampling.sigma_max;
        let mut rng = StdRng::seed_from_u64(self.sampling.seed);

        let (paths, extremal) = match &self.domain {
            Domain::Refraction(p) => {
                let x_range = (self.bounds.x_min, self.bounds.x_max);
                let paths = if self.sampling.count == 0 {
                    Vec::new()
                } else {
                    let step = (x_range.1 - x_range.0) / self.sampling.count as f64;
                    sampler.sample_two_segment(self.source, self.target, p.boundary_y, x_range, step)
                };
                let extremal = refraction_extremal(
                    self.source,
                    self.target,
                    p,
                    x_range,
                    BOUNDARY_SEARCH_STEP,
                );
                (paths, extremal)
            }
            Domain::Mechanics(p) => {
                let extremal = mechanics_extremal(self.source, self.target, p, sampler.resolution);
                let reference = extremal.as_ref().map(|e| &e.path);
                let paths = sampler.sample_curve_family(
                    self.source,
                    self.target,
                    self.sampling.mode,
                    self.sampling.count,
                    reference,
                    &mut rng,
                );
                (paths, extremal)
            }
            Domain::Interference(p) => {
                let half = p.slit_separation / 2.0;
                let via_a = Point::new(p.slit_x, p.slit_center_y - half);
                let via_b = Point::new(p.slit_x, p.slit_center_y + half);
                let paths = sampler.sample_two_fixed_paths(self.source, self.target, via_a, via_b);
                // Both slit paths contribute; neither is extremal.
                (paths, None)
            }
        };

        if paths.is_empty() {
            return EngineSnapshot::empty();
        }

        let mut candidates: Vec<Candidate> = paths
            .into_iter()
            .map(|path| {
                let cost = self.domain.cost(&path);
                Candidate { path, cost }
            })
            .collect();
        candidates.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        let costs: Vec<f64> = candidates.iter().map(|c| c.cost).collect();
        let (phasors, interference) = aggregate(&costs, self.domain.phase_scale());

        let extremal = extremal.map(|e| Candidate {
            cost: e.cost,
            path: e.path,
        });
        let diagnostics = self.diagnostics(&candidates, extremal.as_ref());

        EngineSnapshot {
            candidates,
            extremal,
            phasors,
            interference,
            diagnostics,
        }
    }

    /// Interference intensity at each screen position, moving the target
    /// vertically and recomputing per position.
    pub fn intensity_profile(&self, screen_ys: &[f64]) -> Array1<f64> {
        let mut probe = self.clone();
        screen_ys
            .iter()
            .map(|&y| {
                probe.target = Point::new(self.target.x, y);
                probe.recompute().interference.intensity()
            })
            .collect()
    }

    fn diagnostics(
        &self,
        candidates: &[Candidate],
        extremal: Option<&Candidate>,
    ) -> Option<Diagnostics> {
        match &self.domain {
            Domain::Refraction(_) => extremal.map(|e| {
                let (incidence, refraction) = refraction_angles(&e.path);
                let sine_ratio = if refraction.sin().abs() > 1e-12 {
                    incidence.sin() / refraction.sin()
                } else {
                    0.0
                };
                Diagnostics::Refraction {
                    incidence,
                    refraction,
                    sine_ratio,
                }
            }),
            Domain::Mechanics(p) => {
                let (vx0, vy0) = launch_velocity(self.source, self.target, p.gravity);
                Some(Diagnostics::Mechanics {
                    flight_time: flight_time(self.source, self.target, p.gravity),
                    vx0,
                    vy0,
                })
            }
            Domain::Interference(p) => {
                if candidates.len() < 2 {
                    return None;
                }
                let length_a = candidates[0].cost;
                let length_b = candidates[1].cost;
                let delta_phase = optical_phase((length_b - length_a).abs(), p);
                Some(Diagnostics::Interference {
                    length_a,
                    length_b,
                    delta_phase,
                })
            }
        }
    }

    /// Save the full parameter set as pretty-printed JSON.
    pub fn save(&self, filepath: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(filepath, json)
    }

    /// Load a parameter set from JSON.
    pub fn load(filepath: &str) -> Result<Self, std::io::Error> {
        let json = fs::read_to_string(filepath)?;
        let state: Self = serde_json::from_str(&json)?;
        Ok(state)
    }
}
