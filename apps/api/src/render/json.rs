//! JSON export of an analysis report.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::errors::AppError;
use crate::models::report::AnalysisReport;

const INDENT: &[u8] = b"    ";

/// Serializes the report with four-space indentation.
pub fn to_pretty_json(report: &AnalysisReport) -> Result<String, AppError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    report
        .serialize(&mut serializer)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON export failed: {e}")))?;
    String::from_utf8(buf)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON export was not UTF-8: {e}")))
}
