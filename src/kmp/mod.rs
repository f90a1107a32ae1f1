//! Step-wise Knuth-Morris-Pratt engine.
//!
//! Two state machines, both driven one transition per `advance()` call:
//!
//! | Machine            | Computes                          | Events          |
//! |--------------------|-----------------------------------|-----------------|
//! | [`LpsBuilder`]     | failure function of the pattern   | [`LpsEvent`]    |
//! | [`PatternMatcher`] | match spans of the pattern in text | [`SearchEvent`] |
//!
//! A driver advances the builder until it reports [`LpsEvent::Completed`],
//! then seeds a matcher with the finished array and advances it until it
//! reports [`SearchEvent::Completed`]. Neither machine renders anything;
//! events carry indices and the caller decides how to show them.

use std::fmt;

pub mod lps;
pub mod matcher;


pub use lps::{LpsBuilder, LpsCursor, LpsEvent, LpsSnapshot};
pub use matcher::{PatternMatcher, SearchCursor, SearchEvent, SearchSnapshot};

/// Where a builder/matcher pair is in its lifecycle.
///
/// Phases only ever move forward. A builder lives in `Idle..=LpsDone`, a
/// matcher in `LpsDone..=SearchDone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    BuildingLps,
    LpsDone,
    Searching,
    SearchDone,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::BuildingLps => "building LPS",
            Phase::LpsDone => "LPS done",
            Phase::Searching => "searching",
            Phase::SearchDone => "search done",
        };
        f.write_str(name)
    }
}

/// An occurrence of the pattern in the text, as inclusive text indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether two spans share at least one text index.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Span::new(start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}
