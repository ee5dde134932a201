//! Writes the PDF and JSON exports of a report side by side on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::layout::font_metrics::PageConfig;
use crate::models::report::AnalysisReport;
use crate::render::json::to_pretty_json;
use crate::render::report::render_pdf;

pub const PDF_FILE_NAME: &str = "result.pdf";
pub const JSON_FILE_NAME: &str = "result.json";

#[derive(Debug, Clone, Serialize)]
pub struct BundlePaths {
    pub pdf_path: PathBuf,
    pub json_path: PathBuf,
}

/// Renders both exports and writes them into `dir`, creating it if needed.
///
/// Blocking: callers on the async runtime wrap this in `spawn_blocking`.
pub fn write_bundle(
    dir: &Path,
    report: &AnalysisReport,
    config: &PageConfig,
) -> Result<BundlePaths, AppError> {
    let pdf = render_pdf(report, config)?;
    let json = to_pretty_json(report)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let pdf_path = dir.join(PDF_FILE_NAME);
    let json_path = dir.join(JSON_FILE_NAME);
    std::fs::write(&pdf_path, &pdf)
        .with_context(|| format!("Failed to write {}", pdf_path.display()))?;
    std::fs::write(&json_path, json)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    info!(dir = %dir.display(), pdf_bytes = pdf.len(), "Export bundle written");
    Ok(BundlePaths {
        pdf_path,
        json_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;

    fn make_report() -> AnalysisReport {
        AnalysisReport {
            news: "Local council approves new bike lanes".to_string(),
            prediction: "Real".to_string(),
            confidence: 88.0,
            explanation: "Consistent with council minutes.".to_string(),
            proof_links: vec![],
        }
    }

    #[test]
    fn test_write_bundle_creates_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("exports");
        let paths = write_bundle(&dir, &make_report(), &default_page_config()).unwrap();

        assert_eq!(paths.pdf_path, dir.join("result.pdf"));
        let pdf = std::fs::read(&paths.pdf_path).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let json = std::fs::read_to_string(&paths.json_path).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, make_report());
    }

    #[test]
    fn test_write_bundle_overwrites_previous_export() {
        let tmp = tempfile::tempdir().unwrap();
        let config = default_page_config();
        write_bundle(tmp.path(), &make_report(), &config).unwrap();

        let mut second = make_report();
        second.prediction = "Fake".to_string();
        let paths = write_bundle(tmp.path(), &second, &config).unwrap();

        let json = std::fs::read_to_string(paths.json_path).unwrap();
        assert!(json.contains("\"Fake\""));
    }
}
