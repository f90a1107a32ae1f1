//! Step-by-step Knuth-Morris-Pratt search.
//!
//! The failure function is built, and the text scanned, one comparison per
//! call, with every intermediate state exposed for display.
//!
//! # Example
//!
//! ```rust
//! use kmp_stepper::{Phase, Session, Span};
//!
//! let mut session = Session::from_strs("AA", "AAAA");
//!
//! // Build the LPS array, then search, one step at a time.
//! while session.phase() != Phase::SearchDone {
//!     let event = session.step().unwrap();
//!     println!("{event}");
//! }
//!
//! assert_eq!(session.lps_snapshot().lps, &[0, 1]);
//! assert_eq!(
//!     session.matches(),
//!     &[Span::new(0, 1), Span::new(1, 2), Span::new(2, 3)]
//! );
//! ```

pub mod app;
pub mod command;
mod error;
pub mod keybind;
pub mod kmp;
mod narrate;
pub mod render;
pub mod screen;
mod session;
pub mod terminal;

pub use command::{ExecOutcome, compile, execute};
pub use error::{Component, StepError};
pub use kmp::{
    LpsBuilder, LpsCursor, LpsEvent, LpsSnapshot, PatternMatcher, Phase, SearchCursor,
    SearchEvent, SearchSnapshot, Span,
};
pub use session::{Session, StepEvent};
