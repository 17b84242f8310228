use crate::error::{LogstatError, Result};
use crate::model::ReportConfig;
use crate::util::web_url;
use chrono::{DateTime, Local};
use gix::{discover, ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use regex::{Regex, RegexBuilder};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};
use tracing::debug;

/// `%ad` as printed by `git log --date=local`.
pub const LOG_DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y";

/// Which commits to emit and how to print them.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    /// Matched case-insensitively against `Name <email>`.
    pub author: Option<Regex>,
    /// Matched case-insensitively against each line of the commit message.
    pub grep: Option<Regex>,
    pub include_merges: bool,
    /// Base URL used to turn each subject into a commit link.
    pub link_base: Option<String>,
}

impl LogQuery {
    pub fn from_config(config: &ReportConfig, include_merges: bool) -> Result<Self> {
        Ok(Self {
            author: config
                .author()
                .map(|p| case_insensitive(p, false))
                .transpose()?,
            grep: config
                .message_filter()
                .map(|p| case_insensitive(p, true))
                .transpose()?,
            include_merges,
            link_base: None,
        })
    }

    pub fn with_link_base(mut self, link_base: Option<String>) -> Self {
        self.link_base = link_base;
        self
    }

    fn format_line(&self, time: &DateTime<Local>, subject: &str, hash: &str, author: &str) -> String {
        let message = match &self.link_base {
            Some(base) => format!("[{subject}]({base}/commit/{hash})"),
            None => subject.to_string(),
        };
        // a filtered log is single-author, so the suffix would be redundant
        if self.author.is_some() {
            format!("{} - {message}", time.format(LOG_DATE_FORMAT))
        } else {
            format!("{} - {message} @{author}", time.format(LOG_DATE_FORMAT))
        }
    }
}

/// `multi_line` makes `^`/`$` match at each message line, as `git log --grep` does.
fn case_insensitive(pattern: &str, multi_line: bool) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern)
        .case_insensitive(true)
        .multi_line(multi_line)
        .build()?)
}

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or(std::env::current_dir()?);

        let repo = discover(&repo_path)?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `origin` fetch URL, if one is configured.
    pub fn remote_url(&self) -> Option<String> {
        let remote = self.repo.find_remote("origin").ok()?;
        let url = remote.url(gix::remote::Direction::Fetch)?;
        Some(url.to_bstring().to_string())
    }

    pub fn commit_link_base(&self) -> Option<String> {
        self.remote_url().map(|url| web_url(&url))
    }

    /// Walks history from HEAD and prints one `<date> - <message>[ @author]`
    /// line per commit, oldest first.
    pub fn log_lines(&self, query: &LogQuery, progress: bool) -> Result<String> {
        let mut head = self.repo.head()?;
        let head_commit = head.peel_to_commit_in_place()?;

        let mut entries: Vec<(i64, String)> = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = if progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Collecting commits...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();
            stack.extend(parents.iter().copied());
            pb.inc(1);

            if !query.include_merges && parents.len() > 1 {
                continue;
            }

            let author = commit.author()?;
            let author_name = author.name.to_string();
            if let Some(pattern) = &query.author {
                let identity = format!("{} <{}>", author.name, author.email);
                if !pattern.is_match(&identity) {
                    continue;
                }
            }

            if let Some(pattern) = &query.grep {
                let message = commit.message_raw()?.to_string();
                if !pattern.is_match(&message) {
                    continue;
                }
            }

            // author date, like `%ad`
            let secs = author.time()?.seconds;
            let time = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| LogstatError::InvalidDate(format!("Invalid timestamp: {secs}")))?
                .with_timezone(&Local);

            let title = commit.message()?.title.to_string();
            let subject = title.split_whitespace().collect::<Vec<_>>().join(" ");

            let line = query.format_line(&time, &subject, &commit_id.to_string(), &author_name);
            entries.push((secs, line));
        }

        pb.finish_with_message("Commits collected");

        // walk order is newest first; keep it (reversed) for equal timestamps
        entries.reverse();
        entries.sort_by_key(|(secs, _)| *secs);
        debug!(commits = entries.len(), visited = seen.len(), "collected log lines");

        let mut out = entries
            .into_iter()
            .map(|(_, line)| line)
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 5, 9, 7, 3).unwrap()
    }

    #[test]
    fn formats_lines_like_git_local_dates() {
        let query = LogQuery::default();
        assert_eq!(
            query.format_line(&time(), "Fix bug", "abc123", "alice"),
            "Fri Jan 5 09:07:03 2024 - Fix bug @alice"
        );
    }

    #[test]
    fn author_filter_drops_suffix() {
        let config =
            ReportConfig::new(Some("alice".into()), None, Vec::<(String, String)>::new()).unwrap();
        let query = LogQuery::from_config(&config, false).unwrap();
        assert_eq!(
            query.format_line(&time(), "Fix bug", "abc123", "alice"),
            "Fri Jan 5 09:07:03 2024 - Fix bug"
        );
    }

    #[test]
    fn link_base_wraps_subject() {
        let query = LogQuery::default().with_link_base(Some("https://github.com/o/r".into()));
        assert_eq!(
            query.format_line(&time(), "Fix bug", "abc123", "alice"),
            "Fri Jan 5 09:07:03 2024 - [Fix bug](https://github.com/o/r/commit/abc123) @alice"
        );
    }

    #[test]
    fn filters_are_case_insensitive() {
        let config = ReportConfig::new(
            Some("ALICE".into()),
            Some("^fix".into()),
            Vec::<(String, String)>::new(),
        )
        .unwrap();
        let query = LogQuery::from_config(&config, false).unwrap();
        assert!(query.author.unwrap().is_match("alice <alice@example.com>"));
        assert!(query.grep.unwrap().is_match("Fix the thing"));
    }

    #[test]
    fn grep_matches_any_message_line() {
        let config = ReportConfig::new(None, Some("^fix".into()), Vec::<(String, String)>::new())
            .unwrap();
        let query = LogQuery::from_config(&config, false).unwrap();
        let grep = query.grep.unwrap();
        assert!(grep.is_match("Tidy up parser\n\nfix: empty input crash\n"));
        assert!(!grep.is_match("Tidy up parser\n\nprefix fix later\n"));
    }

    #[test]
    fn formatted_lines_parse_back() {
        let line = LogQuery::default().format_line(&time(), "Fix bug", "abc123", "alice");
        let parsed = crate::parse::parse(&line, None).unwrap();
        assert_eq!(parsed.stats.authors.get("alice"), Some(&1));
        assert_eq!(parsed.stats.peak_hour, Some(9));
    }
}
