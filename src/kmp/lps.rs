//! Incremental construction of the failure function ("LPS array").
//!
//! `lps[k]` is the length of the longest proper prefix of `pattern[0..=k]`
//! that is also a suffix of it. Each call to [`LpsBuilder::advance`] performs
//! one comparison and reports what it did.

use crate::error::{Component, StepError};

use super::Phase;

/// Cursor of the LPS phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LpsCursor {
    /// Index of the pattern symbol being classified.
    pub i: usize,
    /// Length of the prefix currently matched against the suffix ending before `i`.
    pub prev_lps: usize,
}

/// What a single LPS step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LpsEvent {
    /// Cursor initialised; `len` is the pattern length.
    Started { len: usize },
    /// `pattern[index] == pattern[from]`, so `lps[index] = to = from + 1`.
    Extended { index: usize, from: usize, to: usize },
    /// Mismatch with no prefix to fall back on, so `lps[index] = 0`.
    NoMatch { index: usize },
    /// `pattern[index] != pattern[from]`, so `prev_lps` falls back to
    /// `lps[from - 1] = to`. The same `index` is compared again next step.
    Backtracked { index: usize, from: usize, to: usize },
    /// All entries are final.
    Completed { lps: Vec<usize> },
}

/// Read-only view of the builder for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LpsSnapshot<'a> {
    pub lps: &'a [usize],
    pub i: usize,
    pub prev_lps: usize,
    pub phase: Phase,
}

/// Computes the failure function of a fixed pattern one step at a time.
#[derive(Debug, Clone)]
pub struct LpsBuilder<S> {
    pattern: Vec<S>,
    lps: Vec<usize>,
    cursor: LpsCursor,
    phase: Phase,
}

impl<S: PartialEq> LpsBuilder<S> {
    pub fn new(pattern: impl Into<Vec<S>>) -> Self {
        let pattern = pattern.into();
        Self {
            lps: vec![0; pattern.len()],
            pattern,
            cursor: LpsCursor::default(),
            phase: Phase::Idle,
        }
    }

    pub fn pattern(&self) -> &[S] {
        &self.pattern
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> LpsCursor {
        self.cursor
    }

    /// The array as computed so far. Entries at or beyond the cursor are 0.
    pub fn lps(&self) -> &[usize] {
        &self.lps
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::LpsDone
    }

    pub fn snapshot(&self) -> LpsSnapshot<'_> {
        LpsSnapshot {
            lps: &self.lps,
            i: self.cursor.i,
            prev_lps: self.cursor.prev_lps,
            phase: self.phase,
        }
    }

    /// The finished array, for seeding a [`PatternMatcher`](super::PatternMatcher).
    pub fn finished(&self) -> Result<&[usize], StepError> {
        if self.is_done() {
            Ok(&self.lps)
        } else {
            Err(StepError::InvalidState {
                component: Component::PatternMatcher,
                phase: self.phase,
            })
        }
    }

    /// Perform one transition.
    ///
    /// The first call initialises the cursor. Later calls each classify or
    /// backtrack once; the call after the last index has been written
    /// reports [`LpsEvent::Completed`]. Calling again after that is an error.
    pub fn advance(&mut self) -> Result<LpsEvent, StepError> {
        let event = match self.phase {
            Phase::Idle => self.start(),
            Phase::BuildingLps => self.step(),
            phase => {
                return Err(StepError::InvalidState {
                    component: Component::LpsBuilder,
                    phase,
                });
            }
        };
        log::trace!("lps step {:?} now at {:?}", event, self.cursor);
        Ok(event)
    }

    fn start(&mut self) -> LpsEvent {
        self.cursor = LpsCursor { i: 1, prev_lps: 0 };
        self.lps.fill(0);
        // An empty pattern has nothing to classify.
        self.phase = if self.pattern.is_empty() {
            Phase::LpsDone
        } else {
            Phase::BuildingLps
        };
        LpsEvent::Started {
            len: self.pattern.len(),
        }
    }

    fn step(&mut self) -> LpsEvent {
        let LpsCursor { i, prev_lps } = self.cursor;

        if i >= self.pattern.len() {
            self.phase = Phase::LpsDone;
            return LpsEvent::Completed {
                lps: self.lps.clone(),
            };
        }

        // prev_lps < i always holds here, so pattern[prev_lps] is in range.
        if self.pattern[i] == self.pattern[prev_lps] {
            let to = prev_lps + 1;
            self.lps[i] = to;
            self.cursor = LpsCursor { i: i + 1, prev_lps: to };
            LpsEvent::Extended {
                index: i,
                from: prev_lps,
                to,
            }
        } else if prev_lps == 0 {
            self.lps[i] = 0;
            self.cursor.i = i + 1;
            LpsEvent::NoMatch { index: i }
        } else {
            let to = self.lps[prev_lps - 1];
            self.cursor.prev_lps = to;
            LpsEvent::Backtracked {
                index: i,
                from: prev_lps,
                to,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(pattern: &str) -> LpsBuilder<char> {
        LpsBuilder::new(pattern.chars().collect::<Vec<_>>())
    }

    // Step until completion, returning every event including the last.
    fn run(pattern: &str) -> (LpsBuilder<char>, Vec<LpsEvent>) {
        let mut b = builder(pattern);
        let mut events = Vec::new();
        while !b.is_done() {
            events.push(b.advance().unwrap());
        }
        (b, events)
    }

    #[test]
    fn test_new_builder_is_idle() {
        let b = builder("ABC");
        assert_eq!(b.phase(), Phase::Idle);
        assert_eq!(b.lps(), &[0, 0, 0]);
        assert_eq!(b.cursor(), LpsCursor::default());
    }

    #[test]
    fn test_first_step_starts() {
        let mut b = builder("ABC");
        assert_eq!(b.advance(), Ok(LpsEvent::Started { len: 3 }));
        assert_eq!(b.phase(), Phase::BuildingLps);
        assert_eq!(b.cursor(), LpsCursor { i: 1, prev_lps: 0 });
    }

    #[test]
    fn test_classic_pattern() {
        let (b, events) = run("ABABCABAB");
        assert_eq!(b.lps(), &[0, 0, 1, 2, 0, 1, 2, 3, 4]);
        assert_eq!(
            events.last(),
            Some(&LpsEvent::Completed {
                lps: vec![0, 0, 1, 2, 0, 1, 2, 3, 4]
            })
        );
    }

    #[test]
    fn test_backtrack_does_not_advance_index() {
        let (_, events) = run("AABAAA");
        assert_eq!(
            events,
            vec![
                LpsEvent::Started { len: 6 },
                LpsEvent::Extended { index: 1, from: 0, to: 1 },
                LpsEvent::Backtracked { index: 2, from: 1, to: 0 },
                LpsEvent::NoMatch { index: 2 },
                LpsEvent::Extended { index: 3, from: 0, to: 1 },
                LpsEvent::Extended { index: 4, from: 1, to: 2 },
                LpsEvent::Backtracked { index: 5, from: 2, to: 1 },
                LpsEvent::Extended { index: 5, from: 1, to: 2 },
                LpsEvent::Completed {
                    lps: vec![0, 1, 0, 1, 2, 2]
                },
            ]
        );
    }

    #[test]
    fn test_backtrack_leaves_entry_untouched() {
        let mut b = builder("ABABC");
        for _ in 0..4 {
            b.advance().unwrap();
        }
        // i = 4, prev_lps = 2: 'C' != 'A'
        assert_eq!(
            b.advance(),
            Ok(LpsEvent::Backtracked { index: 4, from: 2, to: 0 })
        );
        assert_eq!(b.cursor(), LpsCursor { i: 4, prev_lps: 0 });
        assert_eq!(b.lps(), &[0, 0, 1, 2, 0]);
    }

    #[test]
    fn test_single_symbol_pattern() {
        let (b, events) = run("A");
        assert_eq!(
            events,
            vec![
                LpsEvent::Started { len: 1 },
                LpsEvent::Completed { lps: vec![0] },
            ]
        );
        assert_eq!(b.lps(), &[0]);
    }

    #[test]
    fn test_empty_pattern_finishes_on_start() {
        let mut b = builder("");
        assert_eq!(b.advance(), Ok(LpsEvent::Started { len: 0 }));
        assert!(b.is_done());
        assert!(b.lps().is_empty());
        assert_eq!(b.finished(), Ok(&[][..]));
    }

    #[test]
    fn test_advance_after_done_fails() {
        let (mut b, _) = run("AB");
        assert_eq!(
            b.advance(),
            Err(StepError::InvalidState {
                component: Component::LpsBuilder,
                phase: Phase::LpsDone,
            })
        );
        // Still done, array unchanged.
        assert_eq!(b.lps(), &[0, 0]);
    }

    #[test]
    fn test_finished_before_done_fails() {
        let mut b = builder("AB");
        b.advance().unwrap();
        assert_eq!(
            b.finished(),
            Err(StepError::InvalidState {
                component: Component::PatternMatcher,
                phase: Phase::BuildingLps
            })
        );
    }

    #[test]
    fn test_snapshot_tracks_cursor() {
        let mut b = builder("AAB");
        b.advance().unwrap();
        b.advance().unwrap();
        let snap = b.snapshot();
        assert_eq!(snap.i, 2);
        assert_eq!(snap.prev_lps, 1);
        assert_eq!(snap.lps, &[0, 1, 0]);
        assert_eq!(snap.phase, Phase::BuildingLps);
    }

    #[test]
    fn test_generic_symbols() {
        let mut b = LpsBuilder::new(vec![7u8, 7, 3, 7]);
        while !b.is_done() {
            b.advance().unwrap();
        }
        assert_eq!(b.lps(), &[0, 1, 0, 1]);
    }
}
