//! Turns a git commit log into a Markdown statistics report and a
//! date-grouped commit listing.

pub mod cli;
pub mod error;
pub mod git;
pub mod logging;
pub mod model;
pub mod parse;
pub mod report;
pub mod util;

pub use error::{LogstatError, Result};
pub use model::{AggregateStats, CommitRecord, DailyLog, ParsedLog, ReportConfig, SubstitutionRule};
pub use parse::parse;
pub use report::{assemble, render_log, render_stats, Report};
