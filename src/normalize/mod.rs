//! Converts raw backend records into canonical [`AnalysisResult`]s.
//!
//! The backend labels records as `offensive`, `non-offensive`, or `hate` and
//! scores them with a decimal fraction serialized as a string. Normalization
//! maps those onto the three-way [`Classification`] and a 0-100 confidence
//! percentage, stamping a fresh id and timestamp since the backend provides
//! neither.

use crate::api::{RawAnalysis, RawRecord};
use crate::{AnalysisResult, Classification, DashboardError, DashboardResult};

/// Normalize one record from the bulk results endpoint
pub fn from_record(record: &RawRecord) -> DashboardResult<AnalysisResult> {
    let classification = parse_label(&record.prediction)?;
    let confidence = parse_score(&record.score)?;

    Ok(AnalysisResult::new(
        record.tweet.clone(),
        classification,
        confidence,
    ))
}

/// Normalize a single-text analysis for the input that produced it
pub fn from_analysis(text: &str, analysis: &RawAnalysis) -> DashboardResult<AnalysisResult> {
    let classification = parse_label(&analysis.label)?;
    let confidence = parse_score(&analysis.score)?;

    Ok(AnalysisResult::new(
        text.to_string(),
        classification,
        confidence,
    ))
}

fn parse_label(label: &str) -> DashboardResult<Classification> {
    match label {
        "non-offensive" => Ok(Classification::Neutral),
        "offensive" => Ok(Classification::Offensive),
        "hate" => Ok(Classification::Hate),
        other => Err(DashboardError::NormalizationError(format!(
            "Unknown label: {}",
            other
        ))),
    }
}

/// Parse a decimal-fraction score and scale it to a 0-100 percentage.
/// Scores outside [0, 1] are rejected, not clamped.
fn parse_score(score: &str) -> DashboardResult<f64> {
    let value = score.trim().parse::<f64>().map_err(|e| {
        DashboardError::NormalizationError(format!("Invalid score {:?}: {}", score, e))
    })?;

    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(DashboardError::NormalizationError(format!(
            "Score out of range: {}",
            score
        )));
    }

    Ok(value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn record(prediction: &str, score: &str) -> RawRecord {
        RawRecord {
            tweet: "some text".to_string(),
            prediction: prediction.to_string(),
            score: score.to_string(),
        }
    }

    #[test]
    fn maps_all_three_labels() {
        assert_eq!(
            from_record(&record("non-offensive", "0.5")).unwrap().classification,
            Classification::Neutral
        );
        assert_eq!(
            from_record(&record("offensive", "0.5")).unwrap().classification,
            Classification::Offensive
        );
        assert_eq!(
            from_record(&record("hate", "0.5")).unwrap().classification,
            Classification::Hate
        );
    }

    #[test]
    fn scales_score_to_percentage_at_full_precision() {
        let result = from_record(&record("hate", "0.873")).unwrap();
        assert!((result.confidence - 87.3).abs() < 1e-9);

        let result = from_record(&record("offensive", "1.0")).unwrap();
        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn stamps_fresh_id_and_timestamp() {
        let before = Local::now();
        let first = from_record(&record("hate", "0.9")).unwrap();
        let second = from_record(&record("hate", "0.9")).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.timestamp >= before);
    }

    #[test]
    fn rejects_unknown_label() {
        let err = from_record(&record("spam", "0.9")).unwrap_err();
        assert!(err.to_string().contains("Unknown label"));
    }

    #[test]
    fn rejects_unparsable_score() {
        let err = from_record(&record("hate", "high")).unwrap_err();
        assert!(err.to_string().contains("Invalid score"));
    }

    #[test]
    fn rejects_out_of_range_score() {
        assert!(from_record(&record("hate", "1.5")).is_err());
        assert!(from_record(&record("hate", "-0.1")).is_err());
        assert!(from_record(&record("hate", "NaN")).is_err());
    }

    #[test]
    fn analysis_uses_the_caller_supplied_text() {
        let analysis = RawAnalysis {
            label: "offensive".to_string(),
            score: "0.42".to_string(),
        };
        let result = from_analysis("the original input", &analysis).unwrap();

        assert_eq!(result.text, "the original input");
        assert_eq!(result.classification, Classification::Offensive);
        assert!((result.confidence - 42.0).abs() < 1e-9);
    }
}
