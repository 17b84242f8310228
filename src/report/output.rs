use chrono::{DateTime, Local, NaiveDate, Utc};
use console::style;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::model::{
    DayCount, ParsedLog, ReportConfig, StatsOutput, WeekdayCount, SCHEMA_VERSION, WEEK,
};
use crate::util::{format_day, weekday_name};

/// `{project}@{author or All}-{YYYY-MM-DD}.md`
pub fn report_file_name(project_name: &str, author: Option<&str>, date: NaiveDate) -> String {
    format!(
        "{project_name}@{}-{}.md",
        author.unwrap_or("All"),
        date.format("%Y-%m-%d")
    )
}

pub fn write_report(dir: &Path, file_name: &str, document: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, document)?;
    info!(path = %path.display(), bytes = document.len(), "wrote report");
    Ok(path)
}

pub fn stats_output(
    parsed: &ParsedLog,
    config: &ReportConfig,
    project_name: &str,
    generated_at: &DateTime<Local>,
) -> StatsOutput {
    StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: generated_at.with_timezone(&Utc),
        project: project_name.to_string(),
        author: config.author.clone(),
        message_filter: config.message_filter.clone(),
        parsed_records: parsed.record_count(),
        busiest_day: parsed
            .busiest_day()
            .map(|(date, commit_count)| DayCount { date, commit_count }),
        weekdays: WEEK
            .iter()
            .zip(parsed.weekday_counts())
            .map(|(weekday, commit_count)| WeekdayCount {
                weekday: weekday_name(*weekday).to_string(),
                commit_count,
            })
            .collect(),
        stats: parsed.stats.clone(),
    }
}

pub fn output_json(
    parsed: &ParsedLog,
    config: &ReportConfig,
    project_name: &str,
    generated_at: &DateTime<Local>,
) -> anyhow::Result<()> {
    let output = stats_output(parsed, config, project_name, generated_at);
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_summary(parsed: &ParsedLog, config: &ReportConfig, project_name: &str) -> anyhow::Result<()> {
    let stats = &parsed.stats;

    println!("{} {}", style("Commit Summary").bold(), style(project_name).dim());
    println!("{}", "─".repeat(50));

    if let Some(filter) = config.message_filter() {
        println!("Search filter: {}", style(filter).yellow());
    }
    println!("Total commits: {}", style(stats.total).cyan());
    println!("Parsed records: {}", style(parsed.record_count()).cyan());
    println!(
        "Average message length: {}",
        style(format!("{:.2}", stats.average_message_length)).cyan()
    );
    if let Some((day, count)) = parsed.busiest_day() {
        println!("Busiest day: {} ({count} commits)", style(format_day(&day)).green());
    }
    if let Some(hour) = stats.peak_hour {
        println!("Peak hour: {}", style(format!("{hour:02}:00")).green());
    }

    if config.author().is_none() && !stats.authors.is_empty() {
        println!("\n{}", style("Authors").bold());
        for (author, count) in stats.authors_by_count().into_iter().take(20) {
            println!("  {:<30} {:>6}", author, count);
        }
        if stats.authors.len() > 20 {
            println!("  ... and {} more", stats.authors.len() - 20);
        }
    }

    println!("\n{}", style("Weekdays").bold());
    for (weekday, count) in WEEK.iter().zip(parsed.weekday_counts()) {
        println!("  {:<10} {:>6}", weekday_name(*weekday), count);
    }

    Ok(())
}
