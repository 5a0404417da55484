use crate::report::{ReportContent, ReportRenderer};
use crate::DashboardResult;

const HEADER: &str = "Text,Classification,Confidence,Timestamp";

/// CSV encoder: one row per filtered result.
///
/// Only the free-text field is quoted; embedded double quotes are doubled
/// per standard CSV rules. Records are joined with `\n` and the output
/// carries no trailing newline.
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(&self, content: &ReportContent) -> DashboardResult<Vec<u8>> {
        let mut lines = Vec::with_capacity(content.results.len() + 1);
        lines.push(HEADER.to_string());

        for row in &content.results {
            lines.push(format!(
                "{},{},{},{}",
                quote(&row.text),
                row.classification,
                row.confidence,
                row.timestamp
            ));
        }

        Ok(lines.join("\n").into_bytes())
    }

    fn mime_type(&self) -> &'static str {
        "text/csv;charset=utf-8;"
    }

    fn extension(&self) -> &'static str {
        "csv"
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
