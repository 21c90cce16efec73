use std::fmt;

/// The error kinds from the evaluator's failure model (spec.md §7). Every
/// runtime error is fatal; there is no in-hand recovery.
#[derive(Debug)]
pub enum Error {
    /// Wrong argv count.
    Usage(String),
    /// `<A it>`, `<B it>` or `<num duplicate hands>` did not parse as an integer.
    Parse(String),
    /// A parameter file was missing or malformed.
    Config(String),
    /// A bet-size successor could not be found when advancing a non-acting seat.
    TreeMismatch(String),
    /// Two-player showdown contributions did not match `LastBetTo()`.
    InvariantViolation(String),
    /// Asymmetric strategies or more than two players at showdown were requested.
    Unsupported(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(msg) => write!(f, "USAGE: {}", msg),
            Error::Parse(msg) => write!(f, "PARSE: {}", msg),
            Error::Config(msg) => write!(f, "CONFIG: {}", msg),
            Error::TreeMismatch(msg) => write!(f, "TREE_MISMATCH: {}", msg),
            Error::InvariantViolation(msg) => write!(f, "INVARIANT_VIOLATION: {}", msg),
            Error::Unsupported(msg) => write!(f, "UNSUPPORTED: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
