use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::report::{ReportContent, ReportRenderer};
use crate::{DashboardError, DashboardResult};

/// Excel encoder: a workbook with a "Summary" sheet of label/value pairs and
/// a "Detailed Results" sheet carrying the unmodified field values. Cells
/// are a structured grid, so no CSV-style quoting applies.
pub struct ExcelRenderer;

impl ReportRenderer for ExcelRenderer {
    fn render(&self, content: &ReportContent) -> DashboardResult<Vec<u8>> {
        build_workbook(content)
            .and_then(|mut workbook| workbook.save_to_buffer())
            .map_err(|e| DashboardError::ReportError(format!("Excel error: {}", e)))
    }

    fn mime_type(&self) -> &'static str {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }

    fn extension(&self) -> &'static str {
        "xlsx"
    }
}

fn build_workbook(content: &ReportContent) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary")?;
    write_summary_sheet(summary, content, &bold)?;

    let results = workbook.add_worksheet();
    results.set_name("Detailed Results")?;
    write_results_sheet(results, content, &bold)?;

    Ok(workbook)
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    content: &ReportContent,
    bold: &Format,
) -> Result<(), XlsxError> {
    sheet.set_column_width(0, 26)?;
    sheet.set_column_width(1, 40)?;

    let date_range = format!(
        "{} - {}",
        content.date_range.start, content.date_range.end
    );
    let visualizations = content.visualizations.join(", ");

    let pairs: [(&str, String); 9] = [
        ("Report", content.title.clone()),
        ("Generated", content.generated_at.clone()),
        ("Date Range", date_range),
        ("Confidence Threshold", content.confidence_threshold.clone()),
        ("Visualizations", visualizations),
        ("Average Confidence", content.summary.average_confidence.clone()),
        ("Neutral", content.summary.distribution.neutral.clone()),
        ("Offensive", content.summary.distribution.offensive.clone()),
        ("Hate Speech", content.summary.distribution.hate.clone()),
    ];

    let mut row = 0u32;
    for (label, value) in pairs.iter().take(5) {
        sheet.write_string_with_format(row, 0, *label, bold)?;
        sheet.write_string(row, 1, value.as_str())?;
        row += 1;
    }

    // Total stays a numeric cell
    sheet.write_string_with_format(row, 0, "Total Analyzed", bold)?;
    sheet.write_number(row, 1, content.summary.total_analyzed as f64)?;
    row += 1;

    for (label, value) in pairs.iter().skip(5) {
        sheet.write_string_with_format(row, 0, *label, bold)?;
        sheet.write_string(row, 1, value.as_str())?;
        row += 1;
    }

    Ok(())
}

fn write_results_sheet(
    sheet: &mut Worksheet,
    content: &ReportContent,
    bold: &Format,
) -> Result<(), XlsxError> {
    sheet.set_column_width(0, 60)?;
    sheet.set_column_width(1, 16)?;
    sheet.set_column_width(2, 12)?;
    sheet.set_column_width(3, 20)?;

    for (col, header) in ["Text", "Classification", "Confidence", "Timestamp"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
    }

    for (i, result) in content.results.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, result.text.as_str())?;
        sheet.write_string(row, 1, result.classification.as_str())?;
        sheet.write_string(row, 2, result.confidence.as_str())?;
        sheet.write_string(row, 3, result.timestamp.as_str())?;
    }

    Ok(())
}
