//! Derived statistics over an immutable result collection.
//!
//! Everything here is a pure function re-run in full whenever the underlying
//! collection changes; there is no incremental state.


use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AnalysisResult, Classification};

/// Number of one-hour buckets in the trend series
pub const TREND_BUCKETS: usize = 7;

/// Per-class result counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationCounts {
    pub neutral: u64,
    pub offensive: u64,
    pub hate: u64,
}

impl ClassificationCounts {
    pub fn get(&self, class: Classification) -> u64 {
        match class {
            Classification::Neutral => self.neutral,
            Classification::Offensive => self.offensive,
            Classification::Hate => self.hate,
        }
    }

    pub fn increment(&mut self, class: Classification) {
        match class {
            Classification::Neutral => self.neutral += 1,
            Classification::Offensive => self.offensive += 1,
            Classification::Hate => self.hate += 1,
        }
    }

    pub fn sum(&self) -> u64 {
        self.neutral + self.offensive + self.hate
    }
}

/// Per-class share of the collection, as 0-100 percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub neutral: f64,
    pub offensive: f64,
    pub hate: f64,
}

impl Distribution {
    pub fn get(&self, class: Classification) -> f64 {
        match class {
            Classification::Neutral => self.neutral,
            Classification::Offensive => self.offensive,
            Classification::Hate => self.hate,
        }
    }
}

/// Summary statistics for a result collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub counts: ClassificationCounts,
    pub average_confidence: f64,
    pub distribution: Distribution,
}

/// Fold a result collection into its summary statistics.
///
/// An empty collection yields all zeros; the zero-total guard lives here so
/// callers never see NaN percentages.
pub fn aggregate(results: &[AnalysisResult]) -> Summary {
    let total = results.len();

    let mut counts = ClassificationCounts::default();
    let mut confidence_sum = 0.0;
    for result in results {
        counts.increment(result.classification);
        confidence_sum += result.confidence;
    }

    if total == 0 {
        return Summary::default();
    }

    let average_confidence = confidence_sum / total as f64;
    let percent = |count: u64| count as f64 / total as f64 * 100.0;

    Summary {
        total,
        counts,
        average_confidence,
        distribution: Distribution {
            neutral: percent(counts.neutral),
            offensive: percent(counts.offensive),
            hate: percent(counts.hate),
        },
    }
}

/// One bucket of the hourly trend series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Hour of day (0-23) this bucket covers
    pub hour: u32,
    pub neutral: f64,
    pub offensive: f64,
    pub hate: f64,
}

/// Partition results into the 7 one-hour buckets ending at the current hour.
///
/// Buckets are keyed by the hour-of-day component of each timestamp, modulo
/// 24: a result from yesterday at 14:00 lands in the same bucket as one
/// from today at 14:00. Empty buckets report 0 for every class.
pub fn hourly_trend(results: &[AnalysisResult], now: DateTime<Local>) -> Vec<TrendPoint> {
    let current_hour = now.hour();

    (0..TREND_BUCKETS as u32)
        .map(|offset| {
            let hour = (current_hour + 24 - (TREND_BUCKETS as u32 - 1) + offset) % 24;

            let mut counts = ClassificationCounts::default();
            for result in results {
                if result.timestamp.hour() == hour {
                    counts.increment(result.classification);
                }
            }

            // An empty bucket divides by 1, not 0
            let denominator = counts.sum().max(1) as f64;
            let percent = |count: u64| count as f64 / denominator * 100.0;

            TrendPoint {
                hour,
                neutral: percent(counts.neutral),
                offensive: percent(counts.offensive),
                hate: percent(counts.hate),
            }
        })
        .collect()
}

/// Which classes a filter lets through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassToggles {
    pub neutral: bool,
    pub offensive: bool,
    pub hate: bool,
}

impl Default for ClassToggles {
    fn default() -> Self {
        Self {
            neutral: true,
            offensive: true,
            hate: true,
        }
    }
}

impl ClassToggles {
    pub fn allows(&self, class: Classification) -> bool {
        match class {
            Classification::Neutral => self.neutral,
            Classification::Offensive => self.offensive,
            Classification::Hate => self.hate,
        }
    }
}

/// Stateless filter applied before aggregation or report assembly.
///
/// The three predicates AND together; an empty search string matches
/// everything and the substring match is case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultFilter {
    pub min_confidence: f64,
    pub classes: ClassToggles,
    pub search: String,
}

impl ResultFilter {
    /// Filter on confidence alone, as report generation does
    pub fn confidence_at_least(threshold: f64) -> Self {
        Self {
            min_confidence: threshold,
            ..Self::default()
        }
    }

    pub fn matches(&self, result: &AnalysisResult) -> bool {
        if result.confidence < self.min_confidence {
            return false;
        }
        if !self.classes.allows(result.classification) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        result
            .text
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    pub fn apply(&self, results: &[AnalysisResult]) -> Vec<AnalysisResult> {
        results
            .iter()
            .filter(|result| self.matches(result))
            .cloned()
            .collect()
    }
}

/// Coarse risk rating shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Rate a distribution by how much of it is hateful or offensive
    pub fn from_distribution(distribution: &Distribution) -> Self {
        if distribution.hate >= 25.0 {
            RiskLevel::High
        } else if distribution.hate >= 10.0 || distribution.offensive >= 30.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        };
        write!(f, "{}", name)
    }
}
