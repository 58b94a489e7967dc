//! Search parameters fixed before the seed generator runs.

use crate::types::{
    SearchError, DEFAULT_PROGRESS_INTERVAL, DEFAULT_STEP_LIMIT, MAX_STATES, MAX_SYMBOLS,
};
use serde::{Deserialize, Serialize};

/// The parameters of one enumeration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of control states, N.
    pub states: usize,
    /// Number of tape symbols, M, including the blank.
    pub symbols: usize,
    /// A machine that has executed more than this many steps is left undetermined.
    pub step_limit: u64,
    /// Driver iterations between two progress reports. `0` disables them.
    pub progress_interval: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            states: 2,
            symbols: 2,
            step_limit: DEFAULT_STEP_LIMIT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl SearchConfig {
    /// Creates a configuration for `states` × `symbols` machines with default limits.
    pub fn new(states: usize, symbols: usize) -> Self {
        Self {
            states,
            symbols,
            ..Self::default()
        }
    }

    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Number of cells in a transition table.
    pub fn cells(&self) -> usize {
        self.states * self.symbols
    }

    /// Checks that the table dimensions can be enumerated and written out.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !(1..=MAX_STATES).contains(&self.states) {
            return Err(SearchError::InvalidConfig(format!(
                "number of states must be between 1 and {}, got {}",
                MAX_STATES, self.states
            )));
        }
        if !(1..=MAX_SYMBOLS).contains(&self.symbols) {
            return Err(SearchError::InvalidConfig(format!(
                "number of symbols must be between 1 and {}, got {}",
                MAX_SYMBOLS, self.symbols
            )));
        }

        Ok(())
    }
}
