//! Turns session state into labelled text rows.
//!
//! Cursor positions come from snapshots; the primary cursor is drawn as
//! `[x]` and the secondary one (prevLPS while building) as `(x)`.

use std::fmt::Display;

use itertools::Itertools;

use crate::kmp::Phase;
use crate::session::Session;

/// Label column width shared by all rows.
const LABEL_WIDTH: usize = 9;

/// Render `items` joined by `sep`, bracketing the `primary` and `secondary` indices.
pub fn mark<T: Display>(
    items: &[T],
    sep: &str,
    primary: Option<usize>,
    secondary: Option<usize>,
) -> String {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if Some(index) == primary {
                format!("[{item}]")
            } else if Some(index) == secondary {
                format!("({item})")
            } else {
                item.to_string()
            }
        })
        .join(sep)
}

/// The pattern written under the text, starting at text column `offset`.
///
/// Marks add columns, so this lines up with an unmarked text row.
pub fn alignment<T: Display>(offset: usize, pattern: &[T]) -> String {
    format!("{}{}", " ".repeat(offset), pattern.iter().join(""))
}

fn row(label: &str, content: &str) -> String {
    format!("{:<width$}{}", label, content, width = LABEL_WIDTH)
}

/// Text, pattern, alignment, LPS and match rows for the current phase.
///
/// Always returns the same number of rows so callers can lay out below them.
pub fn session_rows<S: Display + PartialEq + Clone>(session: &Session<S>) -> Vec<String> {
    let lps = session.lps_snapshot();
    let matches = if session.matches().is_empty() {
        String::new()
    } else {
        session.matches().iter().join(", ")
    };

    match (session.phase(), session.search_snapshot()) {
        (Phase::Searching | Phase::SearchDone, Some(search)) => {
            let text_cursor = (session.phase() == Phase::Searching).then_some(search.i);
            let pattern_cursor = (session.phase() == Phase::Searching).then_some(search.j);
            let align = if session.phase() == Phase::Searching {
                alignment(search.i - search.j, session.pattern())
            } else {
                String::new()
            };
            vec![
                row("Text:", &mark(session.text(), "", text_cursor, None)),
                row("Pattern:", &mark(session.pattern(), "", pattern_cursor, None)),
                row("", &align),
                row("LPS:", &mark(lps.lps, " ", None, None)),
                row("Matches:", &matches),
            ]
        }
        (phase, _) => {
            let building = phase == Phase::BuildingLps;
            let primary = building.then_some(lps.i);
            let secondary = building.then_some(lps.prev_lps);
            vec![
                row("Text:", &mark(session.text(), "", None, None)),
                row("Pattern:", &mark(session.pattern(), "", primary, secondary)),
                String::new(),
                row("LPS:", &mark(lps.lps, " ", primary, secondary)),
                row("Matches:", &matches),
            ]
        }
    }
}
