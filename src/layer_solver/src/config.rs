use serde::{Deserialize, Serialize};

use crate::trace::DEFAULT_TRACE_CAPACITY;

/// Solver limits. Every field has a default, so a config file only needs to
/// name the fields it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Maximum number of moves a trace may hold.
    pub trace_capacity: usize,
    /// Maximum number of loop iterations a single stage may take.
    pub stage_iteration_cap: usize,
    /// Compact after every stage rather than once at the end.
    pub compact_between_stages: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            trace_capacity: DEFAULT_TRACE_CAPACITY,
            stage_iteration_cap: 1000,
            compact_between_stages: true,
        }
    }
}
