use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::ReportConfig;

#[derive(Parser)]
#[command(name = "logstat")]
#[command(about = "Git commit log analysis: authors, hours, weekdays, months and years")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(short, long, action = ArgAction::Count, global = true, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(long, help = "Read raw log lines from this file instead of the repository")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "Only count commits by this author (case-insensitive regex on 'Name <email>')")]
    pub author: Option<String>,

    #[arg(long, help = "Only count commits whose message matches (case-insensitive regex)")]
    pub grep: Option<String>,

    #[arg(
        long = "replace",
        num_args = 2,
        value_names = ["PATTERN", "REPLACEMENT"],
        help = "Rewrite listed messages with a regex replacement; repeatable, applied in order"
    )]
    pub replace: Vec<String>,

    #[arg(long, help = "Include merge commits", default_value_t = false)]
    pub include_merges: bool,

    #[arg(long, help = "Project name shown in the report (defaults to the origin remote's name)")]
    pub project: Option<String>,
}

impl CommonArgs {
    /// `--replace` values arrive flattened; pair them back up in order.
    pub fn substitutions(&self) -> Vec<(String, String)> {
        self.replace
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect()
    }

    pub fn report_config(&self) -> crate::error::Result<ReportConfig> {
        ReportConfig::new(self.author.clone(), self.grep.clone(), self.substitutions())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the Markdown report (statistics followed by the commit listing)
    Report {
        #[arg(long, help = "Directory for the report file", default_value = ".")]
        output_dir: PathBuf,

        #[arg(long, help = "Print the report instead of writing a file")]
        stdout: bool,
    },
    /// Print commit statistics
    Stats {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        crate::logging::setup_logger(self.verbose);
        match self.command {
            Commands::Report { output_dir, stdout } => {
                crate::report::exec_report(self.common, &output_dir, stdout)
            }
            Commands::Stats { json } => crate::report::exec_stats(self.common, json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn replace_pairs_keep_order() {
        let cli = Cli::try_parse_from([
            "logstat",
            "--replace",
            "^(.+): ",
            "[",
            "--replace",
            "#(\\d+)",
            "issue-$1",
            "report",
            "--stdout",
        ])
        .unwrap();

        assert_eq!(
            cli.common.substitutions(),
            vec![
                ("^(.+): ".to_string(), "[".to_string()),
                ("#(\\d+)".to_string(), "issue-$1".to_string()),
            ]
        );
        assert!(matches!(cli.command, Commands::Report { stdout: true, .. }));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["logstat", "stats", "-vv", "--json"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Stats { json: true }));
    }

    #[test]
    fn invalid_replace_pattern_is_rejected() {
        let common = CommonArgs {
            replace: vec!["(".into(), "x".into()],
            ..Default::default()
        };
        assert!(common.report_config().is_err());
    }
}
