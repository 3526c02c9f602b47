//! Run-level tallies and exit status.

use crate::verify::Outcome;
use serde::Serialize;
use std::fmt;

/// Classification of a single outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    Match,
    Mismatch,
    Failed,
}

impl From<&Outcome> for OutcomeKind {
    fn from(outcome: &Outcome) -> Self {
        if outcome.matched() {
            OutcomeKind::Match
        } else if outcome.error().is_some() {
            OutcomeKind::Failed
        } else {
            OutcomeKind::Mismatch
        }
    }
}

/// Totals for one verification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub matched: usize,
    pub mismatched: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn add(&mut self, kind: OutcomeKind) {
        self.total += 1;
        match kind {
            OutcomeKind::Match => self.matched += 1,
            OutcomeKind::Mismatch => self.mismatched += 1,
            OutcomeKind::Failed => self.failed += 1,
        }
    }

    /// True only if every outcome matched.
    pub fn is_success(&self) -> bool {
        self.mismatched == 0 && self.failed == 0
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s): {} ok, {} corrupt, {} unreadable",
            self.total, self.matched, self.mismatched, self.failed
        )
    }
}
