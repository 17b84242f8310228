use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 1;

pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// One raw `<date-time> - <content>` line, borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitLine<'a> {
    pub timestamp_text: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub date: NaiveDate,
    pub hour: u32,
    pub content: String,
    /// Empty when no author could be resolved.
    pub author: String,
}

/// Commit contents grouped by calendar date, arrival order kept within a date.
pub type DailyLog = BTreeMap<NaiveDate, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub authors: BTreeMap<String, usize>,
    pub hourly: BTreeMap<u32, usize>,
    pub monthly: BTreeMap<u32, usize>,
    pub yearly: BTreeMap<i32, usize>,
    /// Sum of author-attributed commits, not of parsed records.
    pub total: usize,
    pub average_message_length: f64,
    pub peak_hour: Option<u32>,
}

impl AggregateStats {
    /// Authors ordered by commit count, most active first.
    pub fn authors_by_count(&self) -> Vec<(&str, usize)> {
        let mut authors: Vec<_> = self
            .authors
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        authors.sort_by(|a, b| b.1.cmp(&a.1));
        authors
    }

    /// `(hour, count, percent of total)` ordered by share, largest first.
    pub fn hourly_share(&self) -> Vec<(u32, usize, f64)> {
        if self.total == 0 {
            return Vec::new();
        }
        let mut shares: Vec<_> = self
            .hourly
            .iter()
            .map(|(hour, count)| (*hour, *count, *count as f64 / self.total as f64 * 100.0))
            .collect();
        shares.sort_by(|a, b| b.1.cmp(&a.1));
        shares
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    pub daily: DailyLog,
    pub stats: AggregateStats,
}

impl ParsedLog {
    pub fn record_count(&self) -> usize {
        self.daily.values().map(Vec::len).sum()
    }

    /// The date with the most records; the earliest such date on ties.
    pub fn busiest_day(&self) -> Option<(NaiveDate, usize)> {
        let mut best: Option<(NaiveDate, usize)> = None;
        for (date, contents) in &self.daily {
            match best {
                Some((_, count)) if contents.len() <= count => {}
                _ => best = Some((*date, contents.len())),
            }
        }
        best
    }

    /// Record counts per weekday, Monday first.
    pub fn weekday_counts(&self) -> [usize; 7] {
        let mut counts = [0usize; 7];
        for (date, contents) in &self.daily {
            counts[date.weekday().num_days_from_monday() as usize] += contents.len();
        }
        counts
    }
}

/// A global find-and-replace applied to each listed commit message.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pattern: Regex,
    replacement: String,
}

impl SubstitutionRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement.as_str())
    }
}

/// Run configuration handed to the parser and the reporter.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    pub author: Option<String>,
    pub message_filter: Option<String>,
    pub substitutions: Vec<SubstitutionRule>,
}

impl ReportConfig {
    pub fn new<I, P, R>(
        author: Option<String>,
        message_filter: Option<String>,
        substitutions: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (P, R)>,
        P: AsRef<str>,
        R: Into<String>,
    {
        let substitutions = substitutions
            .into_iter()
            .map(|(pattern, replacement)| SubstitutionRule::new(pattern.as_ref(), replacement))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            author: author.filter(|a| !a.is_empty()),
            message_filter: message_filter.filter(|f| !f.is_empty()),
            substitutions,
        })
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn message_filter(&self) -> Option<&str> {
        self.message_filter.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    pub commit_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub weekday: String,
    pub commit_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub project: String,
    pub author: Option<String>,
    pub message_filter: Option<String>,
    pub parsed_records: usize,
    pub busiest_day: Option<DayCount>,
    pub weekdays: Vec<WeekdayCount>,
    pub stats: AggregateStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn busiest_day_prefers_earliest_on_tie() {
        let mut daily = DailyLog::new();
        daily.insert(date(2024, 1, 1), vec!["a".into(), "b".into()]);
        daily.insert(date(2024, 1, 2), vec!["c".into(), "d".into()]);
        daily.insert(date(2024, 1, 3), vec!["e".into()]);
        let log = ParsedLog { daily, stats: AggregateStats::default() };

        assert_eq!(log.busiest_day(), Some((date(2024, 1, 1), 2)));
        assert_eq!(log.record_count(), 5);
    }

    #[test]
    fn busiest_day_absent_without_records() {
        assert_eq!(ParsedLog::default().busiest_day(), None);
    }

    #[test]
    fn weekday_counts_start_on_monday() {
        let mut daily = DailyLog::new();
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday
        daily.insert(date(2024, 1, 1), vec!["a".into()]);
        daily.insert(date(2024, 1, 7), vec!["b".into(), "c".into()]);
        let log = ParsedLog { daily, stats: AggregateStats::default() };

        assert_eq!(log.weekday_counts(), [1, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn hourly_share_is_empty_without_total() {
        let mut stats = AggregateStats::default();
        stats.hourly.insert(9, 3);
        assert!(stats.hourly_share().is_empty());
    }

    #[test]
    fn hourly_share_sorts_by_count_then_hour() {
        let mut stats = AggregateStats { total: 4, ..Default::default() };
        stats.hourly.insert(14, 1);
        stats.hourly.insert(9, 2);
        stats.hourly.insert(3, 1);

        let shares = stats.hourly_share();
        let hours: Vec<u32> = shares.iter().map(|s| s.0).collect();
        assert_eq!(hours, vec![9, 3, 14]);
        assert!((shares[0].2 - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn authors_by_count_descending() {
        let mut stats = AggregateStats::default();
        stats.authors.insert("bob".into(), 1);
        stats.authors.insert("alice".into(), 3);
        stats.authors.insert("carol".into(), 1);

        assert_eq!(
            stats.authors_by_count(),
            vec![("alice", 3), ("bob", 1), ("carol", 1)]
        );
    }

    #[test]
    fn substitution_rule_replaces_every_match() {
        let rule = SubstitutionRule::new("o", "0").unwrap();
        assert_eq!(rule.apply("foo boo"), "f00 b00");
    }

    #[test]
    fn report_config_rejects_invalid_pattern() {
        let result = ReportConfig::new(None, None, [("(unclosed", "x")]);
        assert!(result.is_err());
    }

    #[test]
    fn report_config_treats_empty_strings_as_unset() {
        let config =
            ReportConfig::new(Some(String::new()), Some(String::new()), Vec::<(String, String)>::new())
                .unwrap();
        assert_eq!(config.author(), None);
        assert_eq!(config.message_filter(), None);
        assert!(config.substitutions.is_empty());
    }
}
