//! Multi-pattern byte matching with an Aho-Corasick automaton.
//!
//! Build an [`AhoCorasick`] once from a dictionary of byte patterns, then scan
//! any number of haystacks with it. Every occurrence of every pattern is
//! reported, including overlapping ones.
//!
//! ```
//! use dictscan::AhoCorasick;
//!
//! let ac = AhoCorasick::new(["he", "she", "hers"]).unwrap();
//! let found: Vec<(usize, usize)> = ac
//!     .find_overlapping_iter(b"ushers")
//!     .map(|loc| (loc.r#match.pattern_id, loc.start()))
//!     .collect();
//! assert_eq!(found, vec![(1, 1), (0, 2), (2, 2)]);
//! ```

use std::ops::Range;

pub mod ahocorasick;
mod error;

pub use crate::ahocorasick::{AhoCorasick, Builder, FindOverlappingIter, StateID};
pub use crate::error::{BuildError, Result};

/// Matched pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Match {
    /// Index of the pattern in the order it was given to the builder.
    pub pattern_id: usize,
    pub pattern_len: usize,
}

/// Location of a match within some source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub r#match: Match,
    /// Index of the first non-pattern byte that is discovered after a match.
    pub end: usize,
}

impl Location {
    /// Index of the first byte of the match.
    ///
    /// Saturates at 0 for a hand-built location whose `pattern_len`
    /// exceeds `end`.
    pub fn start(&self) -> usize {
        self.end.saturating_sub(self.r#match.pattern_len)
    }

    /// Half-open byte range of the match in the haystack.
    pub fn range(&self) -> Range<usize> {
        self.start()..self.end
    }
}
