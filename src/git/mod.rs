pub mod repo;

pub use repo::{GitRepo, LogQuery, LOG_DATE_FORMAT};
