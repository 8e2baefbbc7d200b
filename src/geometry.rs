//! Scene Geometry Primitives
//!
//! Points, candidate paths, and scene-bound clamping shared by every domain.

use serde::{Deserialize, Serialize};

/// 2-D point in scene coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation between two points at parameter t.
    pub fn lerp(a: Point, b: Point, t: f64) -> Point {
        Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Rectangular scene bounds used to clamp generated interior points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SceneBounds {
    /// Create new bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Clamp a point into the bounds.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.x_min, self.x_max),
            p.y.clamp(self.y_min, self.y_max),
        )
    }

    /// Clamp a scalar into the vertical range.
    pub fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.y_min, self.y_max)
    }

    /// Check whether a point lies inside the bounds.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::new(0.0, 800.0, 0.0, 600.0)
    }
}

/// Ordered sequence of points with the first and last pinned to the
/// source and target endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Point>,
}

impl Path {
    /// Create a path from an ordered point list.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Source endpoint.
    pub fn source(&self) -> Point {
        self.points[0]
    }

    /// Target endpoint.
    pub fn target(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Number of segments.
    pub fn n_segments(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Length of each segment.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .map(|w| w[0].distance_to(&w[1]))
            .collect()
    }

    /// Total arc length.
    pub fn total_length(&self) -> f64 {
        self.segment_lengths().iter().sum()
    }

    /// Interpolated point at parameter t in [0, 1], uniform in index space.
    pub fn at(&self, t: f64) -> Point {
        let n = self.n_segments();
        if n == 0 {
            return self.points[0];
        }
        let s = (t.clamp(0.0, 1.0)) * n as f64;
        let i = (s.floor() as usize).min(n - 1);
        Point::lerp(self.points[i], self.points[i + 1], s - i as f64)
    }
}
