// deltaorbit-core/src/compute_data.rs

use serde::{Deserialize, Serialize};

use crate::StandardComplex;

/// Outcome of one delta-orbit evaluation, including diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EscapeTrace {
    /// 1-based iteration at which |Z|² first exceeded 4, None if the budget ran out
    pub escape_iteration: Option<u32>,
    /// Delta value at escape or at budget exhaustion.
    /// Non-finite components serialize as JSON null and will not read back.
    pub final_delta: StandardComplex,
    /// Whether the Pauldelbrot criterion fired at any step.
    #[serde(default)]
    pub glitched: bool,
    /// How many times the delta was re-anchored onto the combined orbit.
    #[serde(default)]
    pub rebase_count: u32,
}

impl EscapeTrace {
    pub fn escaped(&self) -> bool {
        self.escape_iteration.is_some()
    }

    /// Escape iteration with -1 standing in for "did not escape".
    pub fn escape_iteration_or_sentinel(&self) -> i64 {
        self.escape_iteration.map_or(-1, i64::from)
    }
}
