// Constants

use serde::{Deserialize, Serialize};

// Tolerances
pub const BASE_VECTOR_TOLERANCE: f64 = 1e-10; // For construction of cells (minimal |det|)
pub const DEFAULT_EPS: f64 = 2e-4; // Absolute tolerance for lengths and angles (degrees) during classification
pub const NIGGLI_EPS_FACTOR: f64 = 1e-5; // Reduction tolerance, scaled by |det|^(1/3)
pub const ANGLE_RELATIVE_TOLERANCE: f64 = 1e-5; // Added to eps per degree when matching angles
pub const CENTERING_TOLERANCE: f64 = 1e-3; // For detecting half-integer centering coordinates
pub const PATH_LENGTH_TOLERANCE: f64 = 1e-6; // Remaining path length treated as zero

// Limits
pub const NIGGLI_MAX_ITERATIONS: usize = 10_000;

// Band paths
pub const DEFAULT_NPOINTS: usize = 50;

/// Settings of a single classification request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOptions {
    /// Absolute tolerance for lengths and angles in degrees. Angles also get
    /// `ANGLE_RELATIVE_TOLERANCE` per degree, and the reduction uses `max(eps, NIGGLI_EPS_FACTOR)`.
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// Niggli-reduce the cell before classification. Only disable for pre-reduced cells.
    #[serde(default = "default_reduce")]
    pub reduce: bool,
}

fn default_eps() -> f64 {
    DEFAULT_EPS
}

fn default_reduce() -> bool {
    true
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            reduce: true,
        }
    }
}

impl ClassifierOptions {
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn without_reduction(mut self) -> Self {
        self.reduce = false;
        self
    }
}
