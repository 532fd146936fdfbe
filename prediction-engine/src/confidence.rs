//! Two independent confidence heuristics, both keyed only to the number of
//! records a query was computed from.
//!
//! The ranking and chat endpoints report a [`ConfidenceLevel`]; the numeric
//! prediction endpoints report a [`confidence_score`]. They are not convertible
//! into each other.

use std::fmt;

use serde::{Deserialize, Serialize};

const HIGH_THRESHOLD: usize = 6;
const MEDIUM_THRESHOLD: usize = 3;

const SCORE_BASE: f64 = 0.6;
const SCORE_STEP: f64 = 0.05;
const SCORE_CAP: f64 = 0.95;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConfidenceLevel::Low => "LOW",
            ConfidenceLevel::Medium => "MEDIUM",
            ConfidenceLevel::High => "HIGH",
        })
    }
}

pub fn confidence_level(count: usize) -> ConfidenceLevel {
    if count >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if count >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// `min(0.95, 0.6 + 0.05 * count)`, rounded to two decimals.
pub fn confidence_score(count: usize) -> f64 {
    let raw = (SCORE_BASE + count as f64 * SCORE_STEP).min(SCORE_CAP);
    (raw * 100.0).round() / 100.0
}
