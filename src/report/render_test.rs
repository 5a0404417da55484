use crate::report::{
    create_renderer, render_report, DateRange, DistributionBlock, ReportContent, ReportFormat,
    ReportKind, ReportParams, ReportRow, SummaryBlock, Visualizations,
};
use crate::stats::aggregate;
use crate::{AnalysisResult, Classification, DashboardError};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate, TimeZone};
    use std::str::FromStr;

    fn sample_content() -> ReportContent {
        ReportContent {
            title: "Classification Summary Report".to_string(),
            generated_at: "2024-02-10 14:30:00".to_string(),
            date_range: DateRange {
                start: "All time".to_string(),
                end: "All time".to_string(),
            },
            confidence_threshold: "70%".to_string(),
            summary: SummaryBlock {
                total_analyzed: 3,
                average_confidence: "90.0%".to_string(),
                distribution: DistributionBlock {
                    neutral: "33.3%".to_string(),
                    offensive: "33.3%".to_string(),
                    hate: "33.3%".to_string(),
                },
            },
            visualizations: vec!["distribution".to_string()],
            results: vec![
                ReportRow {
                    text: "He said \"hi\"".to_string(),
                    classification: "Offensive".to_string(),
                    confidence: "87.3%".to_string(),
                    timestamp: "2024-02-10 14:25:00".to_string(),
                },
                ReportRow {
                    text: "Perfectly fine, honestly".to_string(),
                    classification: "Neutral".to_string(),
                    confidence: "95.0%".to_string(),
                    timestamp: "2024-02-10 14:20:00".to_string(),
                },
            ],
        }
    }

    fn empty_content() -> ReportContent {
        ReportContent {
            title: "Detailed Analysis Report".to_string(),
            generated_at: "2024-02-10 14:30:00".to_string(),
            date_range: DateRange {
                start: "All time".to_string(),
                end: "All time".to_string(),
            },
            confidence_threshold: "70%".to_string(),
            summary: SummaryBlock {
                total_analyzed: 0,
                average_confidence: "0.0%".to_string(),
                distribution: DistributionBlock {
                    neutral: "0.0%".to_string(),
                    offensive: "0.0%".to_string(),
                    hate: "0.0%".to_string(),
                },
            },
            visualizations: Vec::new(),
            results: Vec::new(),
        }
    }

    #[test]
    fn assemble_filters_rows_but_summarizes_everything() {
        let results = vec![
            AnalysisResult::new("low".to_string(), Classification::Neutral, 70.0),
            AnalysisResult::new("mid".to_string(), Classification::Offensive, 85.0),
            AnalysisResult::new("high".to_string(), Classification::Hate, 95.0),
        ];
        let summary = aggregate(&results);

        let params = ReportParams {
            confidence_threshold: 80.0,
            ..ReportParams::default()
        };
        let generated_at = Local.with_ymd_and_hms(2024, 2, 10, 14, 30, 0).unwrap();
        let content = ReportContent::assemble(&params, &results, &summary, generated_at);

        assert_eq!(content.title, "Classification Summary Report");
        assert_eq!(content.generated_at, "2024-02-10 14:30:00");
        assert_eq!(content.confidence_threshold, "80%");
        // Rows honor the threshold, the summary block does not
        assert_eq!(content.results.len(), 2);
        assert_eq!(content.summary.total_analyzed, 3);
        assert_eq!(content.summary.average_confidence, "83.3%");
        assert_eq!(content.date_range.start, "All time");
        assert_eq!(content.visualizations, vec!["distribution".to_string()]);
    }

    #[test]
    fn assemble_uses_detailed_title_and_explicit_dates() {
        let params = ReportParams {
            kind: ReportKind::Detailed,
            date_start: Some("2024-01-01".to_string()),
            date_end: Some("2024-01-31".to_string()),
            visualizations: Visualizations {
                distribution: true,
                time_series: true,
                word_cloud: false,
                geographic: false,
            },
            ..ReportParams::default()
        };
        let generated_at = Local.with_ymd_and_hms(2024, 2, 10, 14, 30, 0).unwrap();
        let content = ReportContent::assemble(&params, &[], &aggregate(&[]), generated_at);

        assert_eq!(content.title, "Detailed Analysis Report");
        assert_eq!(content.date_range.start, "2024-01-01");
        assert_eq!(content.date_range.end, "2024-01-31");
        assert_eq!(
            content.visualizations,
            vec!["distribution".to_string(), "timeSeries".to_string()]
        );
        assert_eq!(content.summary.average_confidence, "0.0%");
    }

    #[test]
    fn csv_escapes_quotes_and_joins_with_newlines() {
        let bytes = create_renderer(ReportFormat::Csv)
            .render(&sample_content())
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let expected = "Text,Classification,Confidence,Timestamp\n\
                        \"He said \"\"hi\"\"\",Offensive,87.3%,2024-02-10 14:25:00\n\
                        \"Perfectly fine, honestly\",Neutral,95.0%,2024-02-10 14:20:00";
        assert_eq!(text, expected);
    }

    #[test]
    fn csv_round_trips_through_a_conforming_parser() {
        let bytes = create_renderer(ReportFormat::Csv)
            .render(&sample_content())
            .unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes.as_slice());

        let records: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "He said \"hi\"");
        assert_eq!(&records[0][1], "Offensive");
        assert_eq!(&records[1][0], "Perfectly fine, honestly");
    }

    #[test]
    fn json_round_trips_structurally() {
        let content = sample_content();
        let bytes = create_renderer(ReportFormat::Json).render(&content).unwrap();

        let parsed: ReportContent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, content);
        // Confidence survives as the formatted string, not a float
        assert_eq!(parsed.results[0].confidence, "87.3%");
    }

    #[test]
    fn json_uses_stable_camel_case_keys() {
        let bytes = create_renderer(ReportFormat::Json)
            .render(&sample_content())
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let title = text.find("\"title\"").unwrap();
        let generated = text.find("\"generatedAt\"").unwrap();
        let summary = text.find("\"summary\"").unwrap();
        let results = text.find("\"results\"").unwrap();
        assert!(title < generated && generated < summary && summary < results);
        assert!(text.contains("\"totalAnalyzed\""));
        assert!(text.contains("\"confidenceThreshold\""));
    }

    #[test]
    fn pdf_renders_valid_document() {
        let bytes = create_renderer(ReportFormat::Pdf)
            .render(&sample_content())
            .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn pdf_handles_empty_result_sets() {
        let bytes = create_renderer(ReportFormat::Pdf)
            .render(&empty_content())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_paginates_large_result_sets() {
        let mut content = sample_content();
        content.results = (0..200)
            .map(|i| ReportRow {
                text: format!("row number {} with some reasonably long text behind it", i),
                classification: "Neutral".to_string(),
                confidence: "90.0%".to_string(),
                timestamp: "2024-02-10 14:25:00".to_string(),
            })
            .collect();

        let bytes = create_renderer(ReportFormat::Pdf).render(&content).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn excel_renders_valid_workbook() {
        let bytes = create_renderer(ReportFormat::Excel)
            .render(&sample_content())
            .unwrap();

        // XLSX is a zip container
        assert!(bytes.starts_with(b"PK"));

        let bytes = create_renderer(ReportFormat::Excel)
            .render(&empty_content())
            .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn format_parsing_rejects_unknown_formats() {
        assert_eq!(ReportFormat::from_str("pdf").unwrap(), ReportFormat::Pdf);
        assert_eq!(ReportFormat::from_str("Excel").unwrap(), ReportFormat::Excel);
        assert_eq!(ReportFormat::from_str("xlsx").unwrap(), ReportFormat::Excel);

        let err = ReportFormat::from_str("docx").unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat(_)));
    }

    #[test]
    fn artifact_carries_mime_and_dated_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        let artifact = render_report(&sample_content(), ReportFormat::Csv, date).unwrap();
        assert_eq!(artifact.filename, "hate-speech-report-2024-02-10.csv");
        assert_eq!(artifact.mime_type, "text/csv;charset=utf-8;");

        let artifact = render_report(&sample_content(), ReportFormat::Excel, date).unwrap();
        assert_eq!(artifact.filename, "hate-speech-report-2024-02-10.xlsx");
        assert_eq!(
            artifact.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );

        let artifact = render_report(&sample_content(), ReportFormat::Pdf, date).unwrap();
        assert_eq!(artifact.filename, "hate-speech-report-2024-02-10.pdf");
        assert_eq!(artifact.mime_type, "application/pdf");
    }
}
