//! Explicit status transition table.

use feedback_types::{FeedbackStatus, LifecycleConfig, TransitionPolicy};

const STATES: usize = FeedbackStatus::ALL.len();

/// Allow-matrix over every (from, to) status pair.
///
/// The permissive table allows every pair. A restricted table denies the
/// configured pairs; a same-state request is always allowed so that no-op
/// requests still produce an audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    allowed: [[bool; STATES]; STATES],
}

impl TransitionTable {
    pub fn permissive() -> Self {
        Self {
            allowed: [[true; STATES]; STATES],
        }
    }

    /// Permissive table minus `denied`. Same-state pairs are ignored.
    pub fn with_denied(denied: impl IntoIterator<Item = (FeedbackStatus, FeedbackStatus)>) -> Self {
        let mut table = Self::permissive();
        for (from, to) in denied {
            if from != to {
                table.allowed[from.index()][to.index()] = false;
            }
        }
        table
    }

    pub fn from_config(config: &LifecycleConfig) -> Self {
        match config.policy {
            TransitionPolicy::Permissive => Self::permissive(),
            TransitionPolicy::Restricted => {
                Self::with_denied(config.denied.iter().map(|d| (d.from, d.to)))
            }
        }
    }

    pub fn allows(&self, from: FeedbackStatus, to: FeedbackStatus) -> bool {
        self.allowed[from.index()][to.index()]
    }

    /// Denied pairs in status order.
    pub fn denied(&self) -> Vec<(FeedbackStatus, FeedbackStatus)> {
        FeedbackStatus::ALL
            .iter()
            .flat_map(|&from| FeedbackStatus::ALL.iter().map(move |&to| (from, to)))
            .filter(|&(from, to)| !self.allows(from, to))
            .collect()
    }
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::permissive()
    }
}
