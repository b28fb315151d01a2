use serde::{Deserialize, Serialize};

/// Visit and submission counters with the derived rates, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FormStats {
    pub visits: u64,
    pub submissions: u64,
    pub submission_rate: f64,
    pub bounce_rate: f64,
}

impl FormStats {
    /// Rates are zero when nobody visited.
    pub fn from_counts(visits: u64, submissions: u64) -> Self {
        let (submission_rate, bounce_rate) = if visits > 0 {
            let rate = submissions as f64 / visits as f64 * 100.0;
            (rate, 100.0 - rate)
        } else {
            (0.0, 0.0)
        };
        Self {
            visits,
            submissions,
            submission_rate,
            bounce_rate,
        }
    }

    /// Sums raw counters and recomputes the rates.
    pub fn merge(self, other: FormStats) -> Self {
        Self::from_counts(
            self.visits + other.visits,
            self.submissions + other.submissions,
        )
    }
}
