use crate::cli::CommonArgs;
use crate::git::{GitRepo, LogQuery};
use crate::model::ReportConfig;
use crate::util::project_name;
use anyhow::Context;
use chrono::Local;
use std::path::Path;
use tracing::debug;

use super::{output_json, output_summary, report_file_name, write_report, Report};

/// Raw log text plus the configuration and project name it was read with.
struct Source {
    raw: String,
    config: ReportConfig,
    project: String,
}

fn load_source(common: &CommonArgs, progress: bool) -> anyhow::Result<Source> {
    let config = common
        .report_config()
        .context("Failed to build report configuration")?;

    if let Some(input) = &common.input {
        let raw = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read log input {}", input.display()))?;
        let project = common.project.clone().unwrap_or_else(|| project_name(None));
        debug!(input = %input.display(), "read raw log input");
        return Ok(Source { raw, config, project });
    }

    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;
    let remote = repo.remote_url();
    let project = common
        .project
        .clone()
        .unwrap_or_else(|| project_name(remote.as_deref()));

    let query = LogQuery::from_config(&config, common.include_merges)
        .context("Failed to build log filters")?
        .with_link_base(repo.commit_link_base());
    let raw = repo
        .log_lines(&query, progress)
        .context("Failed to collect commits from repository")?;

    debug!(repo = %repo.path().display(), %project, "collected raw log");
    Ok(Source { raw, config, project })
}

pub fn exec_report(common: CommonArgs, output_dir: &Path, stdout: bool) -> anyhow::Result<()> {
    let source = load_source(&common, !stdout)?;
    let generated_at = Local::now();

    let report = Report::build(&source.raw, &source.config, &source.project, &generated_at)
        .context("Failed to analyze commit log")?;
    let document = report.document();

    if stdout {
        println!("{document}");
        return Ok(());
    }

    let file_name = report_file_name(
        &source.project,
        source.config.author(),
        generated_at.date_naive(),
    );
    let path = write_report(output_dir, &file_name, &document)
        .context("Failed to write report file")?;
    println!("Report written to '{}'", path.display());
    Ok(())
}

pub fn exec_stats(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    // Disable progress indicators for JSON to keep output clean
    let source = load_source(&common, !json)?;
    let generated_at = Local::now();

    let parsed = crate::parse::parse(&source.raw, source.config.author())
        .context("Failed to analyze commit log")?;

    if json {
        output_json(&parsed, &source.config, &source.project, &generated_at)?;
    } else {
        output_summary(&parsed, &source.config, &source.project)?;
    }

    Ok(())
}
