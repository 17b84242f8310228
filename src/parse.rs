use chrono::{Datelike, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::error::{LogstatError, Result};
use crate::model::{AggregateStats, CommitLine, CommitRecord, DailyLog, ParsedLog};

/// `<weekday> <month> <day> <hh>:<mm>:<ss> <year> - <content>`
static COMMIT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\w+) (\w+ \d+ \d+:\d+:\d+ \d+) - (.+)")
        .expect("commit line pattern is valid")
});

/// `<message> @<author>`, split on the last ` @`.
static AUTHOR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+) @(.+)$").expect("author suffix pattern is valid"));

const TIMESTAMP_FORMAT: &str = "%b %d %H:%M:%S %Y";

const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl<'a> CommitLine<'a> {
    /// Splits a raw line, or `None` when it does not have the commit shape.
    pub fn split(line: &'a str) -> Option<Self> {
        let caps = COMMIT_LINE.captures(line)?;
        let weekday = caps.get(1)?;
        let rest = caps.get(2)?;
        Some(Self {
            timestamp_text: &line[weekday.start()..rest.end()],
            content: caps.get(3)?.as_str(),
        })
    }

    /// Resolves the line into a record. The weekday must be an English
    /// abbreviation but is not checked against the date, which comes from
    /// the remaining fields.
    pub fn into_record(self, specified_author: Option<&str>) -> Result<CommitRecord> {
        let invalid = |reason: String| LogstatError::InvalidTimestamp {
            text: self.timestamp_text.to_string(),
            reason,
        };

        let (weekday, rest) = self
            .timestamp_text
            .split_once(' ')
            .unwrap_or((self.timestamp_text, ""));
        if !WEEKDAY_ABBREVIATIONS
            .iter()
            .any(|abbr| abbr.eq_ignore_ascii_case(weekday))
        {
            return Err(invalid(format!("unknown weekday '{weekday}'")));
        }
        let month = rest.split(' ').next().unwrap_or("");
        if month.chars().count() != 3 {
            return Err(invalid(format!("month '{month}' is not a three-letter abbreviation")));
        }

        let timestamp = NaiveDateTime::parse_from_str(rest, TIMESTAMP_FORMAT)
            .map_err(|err| invalid(err.to_string()))?;

        let author = match specified_author {
            Some(author) => author.to_string(),
            None => AUTHOR_SUFFIX
                .captures(self.content)
                .and_then(|caps| caps.get(2))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        };

        Ok(CommitRecord {
            date: timestamp.date(),
            hour: timestamp.hour(),
            content: self.content.to_string(),
            author,
        })
    }
}

/// Parses raw commit-log text into the daily log and its aggregates.
///
/// Lines without the commit shape are skipped. A line with the right shape
/// but an impossible date is an error for the whole input.
pub fn parse(raw_text: &str, specified_author: Option<&str>) -> Result<ParsedLog> {
    let specified_author = specified_author.filter(|a| !a.is_empty());

    let mut daily = DailyLog::new();
    let mut stats = AggregateStats::default();
    let mut message_length_total = 0usize;
    let mut skipped = 0usize;

    for line in raw_text.trim().lines() {
        let Some(commit_line) = CommitLine::split(line) else {
            trace!(line, "skipping line without commit shape");
            skipped += 1;
            continue;
        };
        let record = commit_line.into_record(specified_author)?;

        message_length_total += record.content.chars().count();
        *stats.hourly.entry(record.hour).or_insert(0) += 1;
        *stats.monthly.entry(record.date.month()).or_insert(0) += 1;
        *stats.yearly.entry(record.date.year()).or_insert(0) += 1;
        if !record.author.is_empty() {
            *stats.authors.entry(record.author).or_insert(0) += 1;
        }
        daily.entry(record.date).or_default().push(record.content);
    }

    stats.total = stats.authors.values().sum();
    stats.average_message_length = if stats.total > 0 {
        message_length_total as f64 / stats.total as f64
    } else {
        0.0
    };
    stats.peak_hour = peak_hour(&stats);

    debug!(
        dates = daily.len(),
        attributed = stats.total,
        skipped,
        "parsed commit log"
    );

    Ok(ParsedLog { daily, stats })
}

/// Scans hours in ascending order so the earliest hour wins a tie.
fn peak_hour(stats: &AggregateStats) -> Option<u32> {
    let mut peak: Option<(u32, usize)> = None;
    for hour in 0..24 {
        let count = stats.hourly.get(&hour).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }
        match peak {
            Some((_, best)) if count <= best => {}
            _ => peak = Some((hour, count)),
        }
    }
    peak.map(|(hour, _)| hour)
}
