//! A builder/matcher pair over one pattern and one text.
//!
//! The session is what a driver holds: it routes steps to the right state
//! machine, hands the finished failure function over to the matcher, and
//! keeps the trace of every event produced since the last reset.

use std::fmt;

use crate::error::StepError;
use crate::kmp::{
    LpsBuilder, LpsEvent, LpsSnapshot, PatternMatcher, Phase, SearchEvent, SearchSnapshot, Span,
};

/// An event from either phase, as recorded in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    Lps(LpsEvent),
    Search(SearchEvent),
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::Lps(event) => event.fmt(f),
            StepEvent::Search(event) => event.fmt(f),
        }
    }
}

pub struct Session<S> {
    text: Vec<S>,
    builder: LpsBuilder<S>,
    matcher: Option<PatternMatcher<S>>,
    trace: Vec<StepEvent>,
}

impl Session<char> {
    pub fn from_strs(pattern: &str, text: &str) -> Self {
        Self::new(
            pattern.chars().collect::<Vec<_>>(),
            text.chars().collect::<Vec<_>>(),
        )
    }
}

impl<S: PartialEq + Clone> Session<S> {
    pub fn new(pattern: impl Into<Vec<S>>, text: impl Into<Vec<S>>) -> Self {
        let builder = LpsBuilder::new(pattern);
        let text = text.into();
        log::debug!(
            "new session: pattern of {} symbols, text of {} symbols",
            builder.pattern().len(),
            text.len()
        );
        Self {
            text,
            builder,
            matcher: None,
            trace: Vec::new(),
        }
    }

    /// Discard all progress and start over with a new pattern and text.
    pub fn reset(&mut self, pattern: impl Into<Vec<S>>, text: impl Into<Vec<S>>) {
        *self = Self::new(pattern, text);
    }

    /// Discard all progress, keeping the current pattern and text.
    pub fn restart(&mut self) {
        let pattern = self.builder.pattern().to_vec();
        let text = std::mem::take(&mut self.text);
        self.reset(pattern, text);
    }

    pub fn pattern(&self) -> &[S] {
        self.builder.pattern()
    }

    pub fn text(&self) -> &[S] {
        &self.text
    }

    pub fn phase(&self) -> Phase {
        match &self.matcher {
            Some(matcher) => matcher.phase(),
            None => self.builder.phase(),
        }
    }

    pub fn lps_snapshot(&self) -> LpsSnapshot<'_> {
        self.builder.snapshot()
    }

    /// `None` until the first search step.
    pub fn search_snapshot(&self) -> Option<SearchSnapshot<'_>> {
        self.matcher.as_ref().map(PatternMatcher::snapshot)
    }

    /// Spans found so far. Complete once the phase is [`Phase::SearchDone`].
    pub fn matches(&self) -> &[Span] {
        match &self.matcher {
            Some(matcher) => matcher.matches(),
            None => &[],
        }
    }

    /// Every event since the last reset, oldest first.
    pub fn trace(&self) -> &[StepEvent] {
        &self.trace
    }

    pub fn step_lps(&mut self) -> Result<StepEvent, StepError> {
        let event = StepEvent::Lps(self.builder.advance()?);
        if self.builder.is_done() {
            log::debug!("LPS array complete: {:?}", self.builder.lps());
        }
        Ok(self.record(event))
    }

    /// Advance the search, seeding the matcher on first use.
    pub fn step_search(&mut self) -> Result<StepEvent, StepError> {
        let matcher = match self.matcher.take() {
            Some(matcher) => matcher,
            None => PatternMatcher::from_builder(&self.builder, self.text.clone())?,
        };
        let matcher = self.matcher.insert(matcher);
        let event = StepEvent::Search(matcher.advance()?);
        if matcher.is_done() {
            log::debug!("search complete: {} match(es)", matcher.matches().len());
        }
        Ok(self.record(event))
    }

    /// Advance whichever phase is current.
    pub fn step(&mut self) -> Result<StepEvent, StepError> {
        if self.builder.is_done() {
            self.step_search()
        } else {
            self.step_lps()
        }
    }

    fn record(&mut self, event: StepEvent) -> StepEvent {
        self.trace.push(event.clone());
        event
    }
}
