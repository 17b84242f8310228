pub mod exec;
pub mod log;
pub mod output;
pub mod stats;

pub use exec::{exec_report, exec_stats};
pub use log::{apply_substitutions, render_log};
pub use output::{output_json, output_summary, report_file_name, write_report};
pub use stats::render_stats;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::Result;
use crate::model::{ParsedLog, ReportConfig};
use crate::parse::parse;

pub const SEPARATOR: &str = "\n---\n\n";

/// Joins the statistics and the listing into the final document.
pub fn assemble(stats: &str, log: &str) -> String {
    format!("{stats}{SEPARATOR}{log}")
}

/// Both rendered halves of one run, plus the model they came from.
#[derive(Debug, Clone)]
pub struct Report {
    pub parsed: ParsedLog,
    pub stats: String,
    pub log: String,
}

impl Report {
    pub fn build(
        raw_text: &str,
        config: &ReportConfig,
        project_name: &str,
        generated_at: &DateTime<Local>,
    ) -> Result<Self> {
        let parsed = parse(raw_text, config.author())?;
        let stats = render_stats(&parsed, config, project_name, generated_at);
        let log = render_log(&parsed.daily, &config.substitutions);
        debug!(
            stats_len = stats.len(),
            log_len = log.len(),
            "rendered report"
        );
        Ok(Self { parsed, stats, log })
    }

    pub fn document(&self) -> String {
        assemble(&self.stats, &self.log)
    }
}
