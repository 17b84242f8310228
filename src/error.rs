use thiserror::Error;

pub type Result<T> = std::result::Result<T, LogstatError>;

#[derive(Error, Debug)]
pub enum LogstatError {
    #[error("Invalid timestamp '{text}': {reason}")]
    InvalidTimestamp { text: String, reason: String },
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Signature date error: {0}")]
    SignatureDate(#[from] Box<gix::date::parse::Error>),
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::reference::find::existing::Error> for LogstatError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        LogstatError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for LogstatError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        LogstatError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for LogstatError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        LogstatError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for LogstatError {
    fn from(err: gix::objs::decode::Error) -> Self {
        LogstatError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::discover::Error> for LogstatError {
    fn from(err: gix::discover::Error) -> Self {
        LogstatError::GitDiscover(Box::new(err))
    }
}

impl From<gix::date::parse::Error> for LogstatError {
    fn from(err: gix::date::parse::Error) -> Self {
        LogstatError::SignatureDate(Box::new(err))
    }
}
