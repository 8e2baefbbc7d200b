//! Phasepath Stationary-Phase Teaching Engine
//!
//! Shared numerical core behind three least-something demos: refraction
//! (least time), projectile motion (least action), and double-slit
//! interference (two-path phase difference). Candidate paths between two
//! pinned endpoints are scored by a domain functional, the extremal path is
//! located, and every path becomes a unit phasor whose angle derives from
//! its cost.

pub mod engine;
pub mod extremal;
pub mod functional;
pub mod geometry;
pub mod phasor;
pub mod sampler;

pub use engine::{Candidate, Diagnostics, Domain, EngineSnapshot, SamplingConfig, SimulationState};
pub use extremal::{mechanics_extremal, refraction_extremal, Extremal};
pub use functional::{InterferenceParams, MechanicsParams, RefractionParams};
pub use geometry::{Path, Point, SceneBounds};
pub use phasor::{aggregate, InterferenceResult, PhasorSample};
pub use sampler::{CurveMode, PathSampler};
