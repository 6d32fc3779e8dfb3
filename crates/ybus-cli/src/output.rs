//! Rendering of a finished analysis for stdout or a file.

use num_complex::Complex64;
use serde::Serialize;
use ybus_algo::YBusReport;
use ybus_core::{DiagnosticIssue, StampingPolicy};

use crate::cli::OutputFormat;

/// JSON shape of `ybus build --format json`.
#[derive(Debug, Serialize)]
pub struct YBusDocument {
    pub policy: StampingPolicy,
    pub n_nodes: usize,
    pub labels: Vec<String>,
    /// Raw entries, each as `[re, im]`
    pub matrix: Vec<Vec<Complex64>>,
    /// Entries as printed in the table
    pub formatted: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DiagnosticIssue>,
}

impl YBusDocument {
    pub fn from_report(report: &YBusReport) -> Self {
        let table = report.table();
        Self {
            policy: report.policy,
            n_nodes: report.ybus.n_nodes(),
            labels: table.labels,
            matrix: report.ybus.to_nested(),
            formatted: table.cells,
            warnings: report.diagnostics.warnings().cloned().collect(),
        }
    }
}

/// Render a report; the result always ends with a newline.
pub fn render(report: &YBusReport, format: OutputFormat, pretty_json: bool) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(report.table().render()),
        OutputFormat::Json => {
            let doc = YBusDocument::from_report(report);
            let mut json = if pretty_json {
                serde_json::to_string_pretty(&doc)?
            } else {
                serde_json::to_string(&doc)?
            };
            json.push('\n');
            Ok(json)
        }
    }
}
