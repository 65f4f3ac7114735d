//! Structured check results and the validation report.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Outcome of a single named check.
///
/// `Warn` marks a measurement past its threshold but within 10× of it, the
/// band where finite-difference noise rather than physics is the likely
/// culprit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// One measured check: the value, the threshold it was held against, and a
/// short human-readable detail line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub value: f64,
    pub threshold: f64,
    pub detail: String,
}

impl CheckResult {
    /// Classify a measurement against its threshold.
    pub fn measured(name: &str, value: f64, threshold: f64, detail: impl Into<String>) -> Self {
        let status = if !value.is_finite() {
            CheckStatus::Fail
        } else if value <= threshold {
            CheckStatus::Pass
        } else if value <= 10.0 * threshold {
            CheckStatus::Warn
        } else {
            CheckStatus::Fail
        };
        Self {
            name: name.to_string(),
            status,
            value,
            threshold,
            detail: detail.into(),
        }
    }

    /// A check whose measurement could not be computed at all. The error
    /// text becomes the detail line.
    pub fn errored(name: &str, detail: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            value: f64::NAN,
            threshold: f64::NAN,
            detail: detail.into(),
        }
    }
}

/// Batch of check results for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Label of the metric under test.
    pub metric: String,
    pub checks: Vec<CheckResult>,
}

impl ValidationReport {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            checks: Vec::new(),
        }
    }

    pub fn push(&mut self, check: CheckResult) {
        if check.status != CheckStatus::Pass {
            log::warn!(
                "check '{}' {:?}: {:e} vs threshold {:e}",
                check.name,
                check.status,
                check.value,
                check.threshold
            );
        }
        self.checks.push(check);
    }

    /// True when every check passed outright.
    pub fn all_green(&self) -> bool {
        self.checks.iter().all(|c| c.status == CheckStatus::Pass)
    }

    pub fn failures(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .collect()
    }

    /// Plain-text summary table.
    pub fn report(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "validation: {}", self.metric);
        let _ = writeln!(
            s,
            "{:<28} {:>12} {:>12}   status",
            "check", "value", "threshold"
        );
        for c in &self.checks {
            let _ = writeln!(
                s,
                "{:<28} {:>12.3e} {:>12.3e}   {:?}",
                c.name, c.value, c.threshold, c.status
            );
        }
        let _ = writeln!(
            s,
            "result: {}",
            if self.all_green() { "all green" } else { "CHECK FAILURES" }
        );
        s
    }
}
