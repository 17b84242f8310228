use chrono::{NaiveDate, Weekday};

pub const UNKNOWN_PROJECT: &str = "Unknown Project";

pub fn format_day(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Turns a remote URL into a browsable base URL, without a `.git` suffix.
/// scp-style `git@host:owner/repo` becomes `https://host/owner/repo`.
pub fn web_url(remote: &str) -> String {
    let remote = remote.trim();
    let remote = remote.strip_suffix(".git").unwrap_or(remote);

    if remote.contains("://") {
        return remote.to_string();
    }
    match remote.split_once(':') {
        Some((user_host, path)) => {
            let host = user_host.rsplit('@').next().unwrap_or(user_host);
            format!("https://{host}/{}", path.trim_start_matches('/'))
        }
        None => remote.to_string(),
    }
}

/// Last path segment of the remote URL, or [`UNKNOWN_PROJECT`].
pub fn project_name(remote: Option<&str>) -> String {
    remote
        .map(|r| r.trim().trim_end_matches('/'))
        .map(|r| r.strip_suffix(".git").unwrap_or(r))
        .and_then(|r| r.rsplit(['/', ':']).next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}
