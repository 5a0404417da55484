use crate::report::{ReportContent, ReportRenderer};
use crate::DashboardResult;

/// JSON encoder: the entire report document, pretty-printed.
///
/// Key order follows the struct declaration order of [`ReportContent`], so
/// repeated renders of the same content are byte-identical.
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, content: &ReportContent) -> DashboardResult<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(content)?)
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
