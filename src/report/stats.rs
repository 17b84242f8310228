use chrono::{DateTime, Local};
use std::fmt::Write;

use crate::model::{ParsedLog, ReportConfig, WEEK};
use crate::util::{format_day, weekday_name};

pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the statistics half of the report as Markdown.
pub fn render_stats(
    parsed: &ParsedLog,
    config: &ReportConfig,
    project_name: &str,
    generated_at: &DateTime<Local>,
) -> String {
    let stats = &parsed.stats;
    let mut out = String::new();

    match config.author() {
        Some(author) => {
            let _ = writeln!(out, "# Git Commit Log Analysis Report @{author}\n");
        }
        None => out.push_str("# Git Commit Log Analysis Report\n\n"),
    }
    let _ = writeln!(out, "**Project**: {project_name}\n");
    let _ = writeln!(
        out,
        "**Generated at**: {}\n",
        generated_at.format(GENERATED_AT_FORMAT)
    );

    if let Some(filter) = config.message_filter() {
        let _ = writeln!(out, "**Search filter**: {filter}\n");
    }

    let _ = writeln!(out, "**Total commits**: {}\n", stats.total);
    let _ = writeln!(
        out,
        "**Average message length**: {:.2} characters\n",
        stats.average_message_length
    );

    if let Some((day, count)) = parsed.busiest_day() {
        let _ = writeln!(out, "**Busiest day**: {} ({count} commits)\n", format_day(&day));
    }

    if config.author().is_none() {
        out.push_str("**Commits per author**:\n");
        for (author, count) in stats.authors_by_count() {
            let _ = writeln!(out, "  - {author}: {count}");
        }
        out.push('\n');
    }

    if let Some(hour) = stats.peak_hour {
        let _ = writeln!(out, "**Peak commit hour**: {hour}h\n");
    }

    if stats.total > 0 {
        out.push_str("**Commits by hour**:\n");
        for (hour, count, percent) in stats.hourly_share() {
            let _ = writeln!(out, "  - {hour:>2}h: {percent:.2}% ({count} commits)");
        }
        out.push('\n');
    }

    out.push_str("**Commits by weekday**:\n");
    for (weekday, count) in WEEK.iter().zip(parsed.weekday_counts()) {
        let _ = writeln!(out, "  - {}: {count}", weekday_name(*weekday));
    }
    out.push('\n');

    out.push_str("**Commits by month**:\n");
    for (month, count) in &stats.monthly {
        let _ = writeln!(out, "  - {month:>2}: {count}");
    }
    out.push('\n');

    out.push_str("**Commits by year**:\n");
    for (year, count) in &stats.yearly {
        let _ = writeln!(out, "  - {year}: {count}");
    }

    out
}
