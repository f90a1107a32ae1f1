//! Status-line wording for step events.
//!
//! Both drivers show one line per event; the wording lives here so the
//! interactive screen and batch output stay identical.

use std::fmt;

use itertools::Itertools;

use crate::kmp::{LpsEvent, SearchEvent};

impl fmt::Display for LpsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LpsEvent::Started { len: 0 } => {
                write!(f, "Pattern is empty, nothing to compute")
            }
            LpsEvent::Started { .. } => write!(f, "Starting LPS computation..."),
            LpsEvent::Extended { index, from, to } => write!(
                f,
                "LPS[{index}] = {to} because pattern[{index}] == pattern[{from}] (prevLPS {from} -> {to})"
            ),
            LpsEvent::NoMatch { index } => write!(
                f,
                "LPS[{index}] = 0 because no proper prefix is also a suffix"
            ),
            LpsEvent::Backtracked { index, from, to } => write!(
                f,
                "Backtrack prevLPS from {from} to LPS[{}] = {to} because pattern[{index}] != pattern[{from}]",
                from - 1
            ),
            LpsEvent::Completed { lps } => {
                write!(f, "LPS computation complete: {}", lps.iter().join(" "))
            }
        }
    }
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchEvent::Started { .. } => write!(f, "Starting pattern search..."),
            SearchEvent::MatchFound { span, .. } => write!(
                f,
                "Pattern found from index {} to {}",
                span.start, span.end
            ),
            SearchEvent::Advanced {
                text_index,
                pattern_index,
            } => write!(f, "Match at text[{text_index}] and pattern[{pattern_index}]"),
            SearchEvent::Backtracked { from, to, .. } => write!(
                f,
                "Backtrack j from {from} to LPS[{}] = {to}",
                from - 1
            ),
            SearchEvent::Mismatch { text_index } => write!(
                f,
                "Mismatch, moving to text[{}]",
                text_index + 1
            ),
            SearchEvent::Completed { matches } if matches.is_empty() => {
                write!(f, "Pattern search complete, no matches")
            }
            SearchEvent::Completed { matches } => write!(
                f,
                "Pattern search complete, found at {}",
                matches.iter().format(", ")
            ),
        }
    }
}
