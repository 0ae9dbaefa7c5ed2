//! Configuration management for the social graph analyzer

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Default configuration for the social graph analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PageRank damping factor (teleport probability is `1 - damping_factor`)
    pub damping_factor: f64,

    /// Convergence tolerance for the iterative solvers
    pub tolerance: f64,

    /// Iteration cap for the iterative solvers
    pub max_iterations: usize,

    /// How many top-ranked nodes to report per measure and per community
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            tolerance: 1e-6,
            max_iterations: 1000,
            top_n: 5,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(damping_factor: f64, tolerance: f64, max_iterations: usize, top_n: usize) -> Self {
        Self {
            damping_factor,
            tolerance,
            max_iterations,
            top_n,
        }
    }

    /// Reject parameter combinations the solvers cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.damping_factor) {
            return Err(GraphError::InvalidParameter(format!(
                "damping factor must be within [0, 1], got {}",
                self.damping_factor
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(GraphError::InvalidParameter(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(GraphError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Solver settings shared by eigenvector centrality and PageRank
    pub fn solver(&self) -> SolverConfig {
        SolverConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }

    /// PageRank settings
    pub fn pagerank(&self) -> PageRankConfig {
        PageRankConfig {
            damping_factor: self.damping_factor,
            solver: self.solver(),
        }
    }
}

/// Stopping rule for power iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Config::default().solver()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    pub damping_factor: f64,
    pub solver: SolverConfig,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Config::default().pagerank()
    }
}
