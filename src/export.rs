use crate::errors::{AppError, ResultExt};
use crate::models::OpportunityReport;
use crate::research_agent::ResearchOutcome;
use std::path::{Path, PathBuf};

/// File name for a report, stamped with its generation time.
pub fn report_file_name(report: &OpportunityReport) -> String {
    format!(
        "market_research_analysis_{}.json",
        report.generated_at.format("%Y%m%d_%H%M%S")
    )
}

/// Writes the report and the agent findings as pretty-printed JSON into `dir`
/// and returns the file path. Report fields sit at the top level next to `pipeline`.
pub fn save_report(outcome: &ResearchOutcome, dir: &Path) -> Result<PathBuf, AppError> {
    let path = dir.join(report_file_name(&outcome.report));
    let json = serde_json::to_string_pretty(outcome)?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Creating report directory {}", dir.display()))?;
    std::fs::write(&path, json).with_context(|| format!("Writing {}", path.display()))?;

    tracing::info!("Report saved to {}", path.display());
    Ok(path)
}
