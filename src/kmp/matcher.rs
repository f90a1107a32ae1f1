//! Incremental KMP search of a text against a finished failure function.
//!
//! All positions are symbol indices. Spans are inclusive and may overlap:
//! after a full match the run restarts through the failure function rather
//! than from zero.

use crate::error::{Component, StepError};

use super::lps::LpsBuilder;
use super::{Phase, Span};

/// Cursor of the search phase.
///
/// While a run is active (`j > 0`), `start == i - j`. Otherwise `start` is
/// either the sentinel `text.len()` or the position the scan just moved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchCursor {
    /// Next text index to compare.
    pub i: usize,
    /// Number of pattern symbols matched so far in the current run.
    pub j: usize,
    /// Text index aligned with `pattern[0]`.
    pub start: usize,
}

/// What a single search step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Started { text_len: usize, pattern_len: usize },
    /// A full match ending just before the cursor was recorded, and the run
    /// restarted with `j = restart`.
    MatchFound { span: Span, restart: usize },
    /// `text[text_index] == pattern[pattern_index]`; both cursors moved on.
    Advanced { text_index: usize, pattern_index: usize },
    /// `text[text_index] != pattern[from]`; `j` fell back to `lps[from - 1] = to`.
    Backtracked { text_index: usize, from: usize, to: usize },
    /// `text[text_index] != pattern[0]`; the scan moves to `text_index + 1`.
    Mismatch { text_index: usize },
    Completed { matches: Vec<Span> },
}

/// Read-only view of the matcher for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSnapshot<'a> {
    pub i: usize,
    pub j: usize,
    pub start: usize,
    pub matches: &'a [Span],
    pub phase: Phase,
}

/// Scans a fixed text for a fixed pattern one step at a time.
#[derive(Debug, Clone)]
pub struct PatternMatcher<S> {
    pattern: Vec<S>,
    text: Vec<S>,
    lps: Vec<usize>,
    cursor: SearchCursor,
    matches: Vec<Span>,
    phase: Phase,
}

impl<S: PartialEq + Clone> PatternMatcher<S> {
    /// Seed a matcher with the array of a finished builder.
    pub fn from_builder(
        builder: &LpsBuilder<S>,
        text: impl Into<Vec<S>>,
    ) -> Result<Self, StepError> {
        let lps = builder.finished()?.to_vec();
        Ok(Self::seeded(builder.pattern().to_vec(), text.into(), lps))
    }
}

impl<S: PartialEq> PatternMatcher<S> {
    /// Seed a matcher with an externally supplied failure function.
    ///
    /// The array must have one entry per pattern symbol with `lps[k] <= k`.
    pub fn new(
        pattern: impl Into<Vec<S>>,
        text: impl Into<Vec<S>>,
        lps: Vec<usize>,
    ) -> Result<Self, StepError> {
        let pattern = pattern.into();
        if lps.len() != pattern.len() {
            return Err(StepError::InvalidInput(format!(
                "LPS array has {} entries for a pattern of length {}",
                lps.len(),
                pattern.len()
            )));
        }
        if let Some((k, v)) = lps.iter().enumerate().find(|&(k, &v)| v > k) {
            return Err(StepError::InvalidInput(format!(
                "lps[{k}] = {v} exceeds its index"
            )));
        }
        Ok(Self::seeded(pattern, text.into(), lps))
    }

    fn seeded(pattern: Vec<S>, text: Vec<S>, lps: Vec<usize>) -> Self {
        let sentinel = text.len();
        Self {
            pattern,
            text,
            lps,
            cursor: SearchCursor {
                i: 0,
                j: 0,
                start: sentinel,
            },
            matches: Vec::new(),
            phase: Phase::LpsDone,
        }
    }

    pub fn pattern(&self) -> &[S] {
        &self.pattern
    }

    pub fn text(&self) -> &[S] {
        &self.text
    }

    pub fn lps(&self) -> &[usize] {
        &self.lps
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> SearchCursor {
        self.cursor
    }

    /// Spans recorded so far, in order of their start index.
    pub fn matches(&self) -> &[Span] {
        &self.matches
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::SearchDone
    }

    pub fn snapshot(&self) -> SearchSnapshot<'_> {
        SearchSnapshot {
            i: self.cursor.i,
            j: self.cursor.j,
            start: self.cursor.start,
            matches: &self.matches,
            phase: self.phase,
        }
    }

    /// Perform one transition.
    ///
    /// The first call initialises the cursor; with an empty pattern or text
    /// it completes straight away. Each later call performs one comparison,
    /// backtrack or match record, until the text is exhausted and
    /// [`SearchEvent::Completed`] is reported.
    pub fn advance(&mut self) -> Result<SearchEvent, StepError> {
        let event = match self.phase {
            Phase::LpsDone => self.start(),
            Phase::Searching => self.step(),
            phase => {
                return Err(StepError::InvalidState {
                    component: Component::PatternMatcher,
                    phase,
                });
            }
        };
        log::trace!("search step {:?} now at {:?}", event, self.cursor);
        Ok(event)
    }

    fn start(&mut self) -> SearchEvent {
        self.cursor = SearchCursor {
            i: 0,
            j: 0,
            start: self.text.len(),
        };
        self.matches.clear();

        if self.pattern.is_empty() || self.text.is_empty() {
            self.phase = Phase::SearchDone;
            return SearchEvent::Completed {
                matches: Vec::new(),
            };
        }
        self.phase = Phase::Searching;
        SearchEvent::Started {
            text_len: self.text.len(),
            pattern_len: self.pattern.len(),
        }
    }

    fn step(&mut self) -> SearchEvent {
        let SearchCursor { i, j, start } = self.cursor;

        if i >= self.text.len() {
            return self.finish();
        }

        if j == self.pattern.len() {
            // Checked before consuming text[i]; the match ends at i - 1.
            let span = Span::new(start, i - 1);
            self.matches.push(span);
            let restart = self.lps[j - 1];
            self.realign(restart);
            SearchEvent::MatchFound { span, restart }
        } else if self.text[i] == self.pattern[j] {
            self.cursor = SearchCursor {
                i: i + 1,
                j: j + 1,
                start: start.min(i - j),
            };
            SearchEvent::Advanced {
                text_index: i,
                pattern_index: j,
            }
        } else if j > 0 {
            let to = self.lps[j - 1];
            self.realign(to);
            SearchEvent::Backtracked {
                text_index: i,
                from: j,
                to,
            }
        } else {
            self.cursor.i = i + 1;
            self.cursor.start = i + 1;
            SearchEvent::Mismatch { text_index: i }
        }
    }

    /// Restart the run at length `j` without moving `i`.
    fn realign(&mut self, j: usize) {
        self.cursor.j = j;
        self.cursor.start = if j == 0 {
            self.text.len()
        } else {
            self.cursor.i - j
        };
    }

    fn finish(&mut self) -> SearchEvent {
        let SearchCursor { i, start, .. } = self.cursor;
        // A match ending on the last text symbol has not been recorded yet.
        if i.checked_sub(start) == Some(self.pattern.len()) {
            self.matches.push(Span::new(start, i - 1));
        }
        self.phase = Phase::SearchDone;
        SearchEvent::Completed {
            matches: self.matches.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn matcher(text: &str, pattern: &str) -> PatternMatcher<char> {
        let mut builder = LpsBuilder::new(chars(pattern));
        while !builder.is_done() {
            builder.advance().unwrap();
        }
        PatternMatcher::from_builder(&builder, chars(text)).unwrap()
    }

    fn run(text: &str, pattern: &str) -> (PatternMatcher<char>, Vec<SearchEvent>) {
        let mut m = matcher(text, pattern);
        let mut events = Vec::new();
        while !m.is_done() {
            events.push(m.advance().unwrap());
        }
        (m, events)
    }

    fn spans(pairs: &[(usize, usize)]) -> Vec<Span> {
        pairs.iter().copied().map(Span::from).collect()
    }

    #[test]
    fn test_new_matcher_waits_in_lps_done() {
        let m = matcher("ABC", "B");
        assert_eq!(m.phase(), Phase::LpsDone);
        assert_eq!(m.cursor(), SearchCursor { i: 0, j: 0, start: 3 });
        assert!(m.matches().is_empty());
    }

    #[test]
    fn test_first_step_starts() {
        let mut m = matcher("ABC", "B");
        assert_eq!(
            m.advance(),
            Ok(SearchEvent::Started {
                text_len: 3,
                pattern_len: 1
            })
        );
        assert_eq!(m.phase(), Phase::Searching);
    }

    #[test]
    fn test_classic_text() {
        let (m, events) = run("ABABDABABCABABABACDABABCABAB", "ABABCABAB");
        assert_eq!(m.matches(), spans(&[(5, 13), (19, 27)]).as_slice());
        assert_eq!(
            events.last(),
            Some(&SearchEvent::Completed {
                matches: spans(&[(5, 13), (19, 27)])
            })
        );
        let found = events
            .iter()
            .filter(|e| matches!(e, SearchEvent::MatchFound { .. }))
            .count();
        // The second match ends on the last symbol and is caught by the final check.
        assert_eq!(found, 1);
    }

    #[test]
    fn test_overlapping_matches() {
        let (m, events) = run("AAAA", "AA");
        assert_eq!(m.matches(), spans(&[(0, 1), (1, 2), (2, 3)]).as_slice());
        assert_eq!(
            events,
            vec![
                SearchEvent::Started {
                    text_len: 4,
                    pattern_len: 2
                },
                SearchEvent::Advanced { text_index: 0, pattern_index: 0 },
                SearchEvent::Advanced { text_index: 1, pattern_index: 1 },
                SearchEvent::MatchFound {
                    span: Span::new(0, 1),
                    restart: 1
                },
                SearchEvent::Advanced { text_index: 2, pattern_index: 1 },
                SearchEvent::MatchFound {
                    span: Span::new(1, 2),
                    restart: 1
                },
                SearchEvent::Advanced { text_index: 3, pattern_index: 1 },
                SearchEvent::Completed {
                    matches: spans(&[(0, 1), (1, 2), (2, 3)])
                },
            ]
        );
    }

    #[test]
    fn test_match_found_does_not_consume_text() {
        let mut m = matcher("ABAB", "AB");
        for _ in 0..3 {
            m.advance().unwrap();
        }
        assert_eq!(m.cursor(), SearchCursor { i: 2, j: 2, start: 0 });
        assert_eq!(
            m.advance(),
            Ok(SearchEvent::MatchFound {
                span: Span::new(0, 1),
                restart: 0
            })
        );
        assert_eq!(m.cursor(), SearchCursor { i: 2, j: 0, start: 4 });
    }

    #[test]
    fn test_backtrack_keeps_text_index() {
        let (m, events) = run("AAB", "AB");
        assert_eq!(
            events[2],
            SearchEvent::Backtracked {
                text_index: 1,
                from: 1,
                to: 0
            }
        );
        assert_eq!(m.matches(), spans(&[(1, 2)]).as_slice());
    }

    #[test]
    fn test_hard_mismatch_moves_start() {
        let mut m = matcher("xyz", "a");
        m.advance().unwrap();
        assert_eq!(m.advance(), Ok(SearchEvent::Mismatch { text_index: 0 }));
        assert_eq!(m.cursor(), SearchCursor { i: 1, j: 0, start: 1 });
    }

    #[test]
    fn test_no_matches() {
        let (m, events) = run("xyz", "a");
        assert!(m.matches().is_empty());
        assert_eq!(events.len(), 5);
        assert_eq!(events[4], SearchEvent::Completed { matches: vec![] });
    }

    #[test]
    fn test_empty_text_completes_on_start() {
        let mut m = matcher("", "AB");
        assert_eq!(m.advance(), Ok(SearchEvent::Completed { matches: vec![] }));
        assert!(m.is_done());
    }

    #[test]
    fn test_empty_pattern_completes_on_start() {
        let mut m = matcher("ABC", "");
        assert_eq!(m.advance(), Ok(SearchEvent::Completed { matches: vec![] }));
        assert!(m.is_done());
    }

    #[test]
    fn test_advance_after_done_fails() {
        let (mut m, _) = run("AB", "B");
        assert_eq!(
            m.advance(),
            Err(StepError::InvalidState {
                component: Component::PatternMatcher,
                phase: Phase::SearchDone,
            })
        );
    }

    #[test]
    fn test_from_unfinished_builder_fails() {
        let builder = LpsBuilder::new(chars("AB"));
        let result = PatternMatcher::from_builder(&builder, chars("ABAB"));
        assert_eq!(
            result.err(),
            Some(StepError::InvalidState {
                component: Component::PatternMatcher,
                phase: Phase::Idle
            })
        );
    }

    #[test]
    fn test_new_validates_lps_length() {
        let result = PatternMatcher::new(chars("AB"), chars("AB"), vec![0]);
        assert!(matches!(result, Err(StepError::InvalidInput(_))));
    }

    #[test]
    fn test_new_validates_lps_bounds() {
        let result = PatternMatcher::new(chars("AB"), chars("AB"), vec![0, 2]);
        assert!(matches!(result, Err(StepError::InvalidInput(_))));
    }

    #[test]
    fn test_new_accepts_valid_lps() {
        let mut m = PatternMatcher::new(chars("AA"), chars("AAA"), vec![0, 1]).unwrap();
        while !m.is_done() {
            m.advance().unwrap();
        }
        assert_eq!(m.matches(), spans(&[(0, 1), (1, 2)]).as_slice());
    }

    #[test]
    fn test_snapshot() {
        let mut m = matcher("ABAB", "AB");
        m.advance().unwrap();
        m.advance().unwrap();
        let snap = m.snapshot();
        assert_eq!((snap.i, snap.j, snap.start), (1, 1, 0));
        assert_eq!(snap.phase, Phase::Searching);
        assert!(snap.matches.is_empty());
    }
}
