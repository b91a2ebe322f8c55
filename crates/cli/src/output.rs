use crate::error::CliError;
use engine_runtime::execution::report::IngestReport;
use std::path::Path;

fn generate_report_json(report: &IngestReport) -> Result<String, CliError> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}

pub async fn write_report(report: &IngestReport, path: &Path) -> Result<(), CliError> {
    let report_json = generate_report_json(report)?;
    tokio::fs::write(path, report_json)
        .await
        .map_err(|source| CliError::ReportWrite {
            path: path.to_path_buf(),
            source,
        })
}
