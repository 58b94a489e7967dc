//! Rendering of finalized machines: one text line per machine, JSON lines, or a
//! count per outcome.

use crate::driver::{Finalized, ResultSink};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::io::{self, Write};

/// One finalized machine as written in the JSON lines format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub table: String,
    pub outcome: Outcome,
    pub steps: u64,
}

impl From<&Finalized> for Record {
    fn from(finalized: &Finalized) -> Self {
        Self {
            table: finalized.table.to_string(),
            outcome: finalized.outcome,
            steps: finalized.steps,
        }
    }
}

/// Writes one transition table per line.
pub fn write_text<W: Write>(out: &mut W, results: &[Finalized]) -> io::Result<()> {
    for finalized in results {
        writeln!(out, "{}", finalized.table)?;
    }
    Ok(())
}

/// Writes one JSON object per line.
pub fn write_json<W: Write>(out: &mut W, results: &[Finalized]) -> io::Result<()> {
    for finalized in results {
        serde_json::to_writer(&mut *out, &Record::from(finalized))?;
        writeln!(out)?;
    }
    Ok(())
}

/// Number of finalized machines per outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: u64,
    pub outcomes: BTreeMap<Outcome, u64>,
}

impl Summary {
    pub fn from_results(results: &[Finalized]) -> Self {
        let mut summary = Self::default();
        for finalized in results {
            summary.record(finalized.outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.total += 1;
        *self.outcomes.entry(outcome).or_default() += 1;
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl ResultSink for Summary {
    fn accept(&mut self, finalized: Finalized) {
        self.record(finalized.outcome);
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for outcome in Outcome::ALL {
            writeln!(f, "{:<15} {}", outcome.name(), self.count(outcome))?;
        }
        write!(f, "{:<15} {}", "total", self.total)
    }
}
