//! Errors raised while building an automaton.

use thiserror::Error;

/// Reasons a pattern set is rejected.
///
/// A rejected set never yields a partially built automaton.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// No patterns were supplied.
    #[error("pattern set is empty")]
    EmptyPatternSet,

    /// A pattern has zero length.
    ///
    /// An empty pattern would terminate at the start state and match at
    /// every position of every haystack.
    #[error("pattern {index} is empty")]
    InvalidPattern { index: usize },
}

/// A specialized `Result` type for automaton construction.
pub type Result<T> = std::result::Result<T, BuildError>;
