use std::fmt::Write;

use crate::model::{DailyLog, SubstitutionRule};
use crate::util::format_day;

/// Applies every rule in order, each to the previous rule's output.
pub fn apply_substitutions(content: &str, rules: &[SubstitutionRule]) -> String {
    rules
        .iter()
        .fold(content.trim().to_string(), |text, rule| rule.apply(&text).into_owned())
}

/// Renders the date-grouped, numbered commit listing.
pub fn render_log(daily: &DailyLog, rules: &[SubstitutionRule]) -> String {
    let mut out = String::from("# Git Commit Log\n\n");

    for (date, contents) in daily {
        let _ = writeln!(out, "##### {}", format_day(date));
        for (i, content) in contents.iter().enumerate() {
            let _ = writeln!(out, "{:>2}. {}", i + 1, apply_substitutions(content, rules));
        }
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use pretty_assertions::assert_eq;

    fn rule(pattern: &str, replacement: &str) -> SubstitutionRule {
        SubstitutionRule::new(pattern, replacement).unwrap()
    }

    #[test]
    fn conventional_prefix_rule() {
        let rules = [rule(r"^(.+): ", "[")];
        assert_eq!(
            apply_substitutions("feat: add parser @alice", &rules),
            "[add parser @alice"
        );
    }

    #[test]
    fn rules_apply_in_order() {
        let rules = [rule("cat", "dog"), rule("dog", "bird")];
        assert_eq!(apply_substitutions("cat and dog", &rules), "bird and bird");
    }

    #[test]
    fn capture_groups_in_replacement() {
        let rules = [rule(r"#(\d+)", "issue-$1")];
        assert_eq!(apply_substitutions("fixes #12 and #7", &rules), "fixes issue-12 and issue-7");
    }

    #[test]
    fn no_rules_is_pass_through() {
        assert_eq!(apply_substitutions("  keep me  ", &[]), "keep me");
    }

    #[test]
    fn renders_numbered_listing_per_day() {
        let raw = "Mon Jan 01 10:00:00 2024 - feat: one @a\n\
                   Tue Jan 02 09:00:00 2024 - fix: two @b\n\
                   Tue Jan 02 10:00:00 2024 - three @b\n";
        let parsed = parse(raw, None).unwrap();
        let rules = [rule(r"^(\w+): ", "[$1] ")];

        let expected = "\
# Git Commit Log

##### 2024-01-01
 1. [feat] one @a

##### 2024-01-02
 1. [fix] two @b
 2. three @b";
        assert_eq!(render_log(&parsed.daily, &rules), expected);
    }

    #[test]
    fn numbers_pad_to_two_columns() {
        let raw: String = (0..10)
            .map(|i| format!("Mon Jan 01 10:{i:02}:00 2024 - c{i} @a\n"))
            .collect();
        let parsed = parse(&raw, None).unwrap();

        let log = render_log(&parsed.daily, &[]);
        assert!(log.contains("\n 9. c8 @a\n10. c9 @a"));
        assert!(log.ends_with("10. c9 @a"));
    }

    #[test]
    fn empty_log_is_just_the_heading() {
        assert_eq!(render_log(&DailyLog::new(), &[]), "# Git Commit Log");
    }
}
