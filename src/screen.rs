//! Screen rendering for interactive mode.
//!
//! The Screen lays out the session rows, a phase/help line and a scrollable
//! status log, then emits only the rows that differ from what is already on
//! the terminal.
//!
//! ```text
//! Text:    ABABDABABCAB...        \
//! Pattern: ABAB[C]ABAB             |
//!                                  |  session rows
//! LPS:     0 0 1 (2) [0] 0 0 0 0   |
//! Matches:                        /
//! Phase: building LPS
//! l: LPS step  s: search step  ...
//! ---- Status ----
//! Starting LPS computation...     \
//! ...                              |  status log
//! <message row>
//! ```

use std::fmt::Display;

use crate::render;
use crate::session::Session;
use crate::terminal::{TermSize, Terminal};

const HELP: &str = "l: LPS step  s: search step  space: step  r: reset  up/down: scroll  q: quit";
const LOG_TITLE: &str = "---- Status ----";

/// Rows above the status log, not counting the session rows.
const CHROME_ROWS: usize = 3;

/// Manages screen rendering.
pub struct Screen {
    size: TermSize,
    /// What is currently on the terminal, one entry per row.
    current: Vec<String>,
    /// How many lines the log view is scrolled back from the newest line.
    log_offset: usize,
    message: Option<String>,
}

impl Screen {
    pub fn new(size: TermSize) -> Self {
        Self {
            size,
            current: Vec::new(),
            log_offset: 0,
            message: None,
        }
    }

    /// Resize the screen (e.g. on terminal resize).
    pub fn resize(&mut self, size: TermSize) {
        self.size = size;
        self.invalidate();
    }

    /// Forget what is on the terminal, forcing a full redraw next time.
    pub fn invalidate(&mut self) {
        self.current.clear();
    }

    pub fn log_offset(&self) -> usize {
        self.log_offset
    }

    /// Number of status log lines visible at once.
    pub fn log_height(&self, session_rows: usize) -> usize {
        // One extra row for the message line.
        (self.size.height as usize).saturating_sub(session_rows + CHROME_ROWS + 1)
    }

    pub fn scroll_up(&mut self, lines: usize, log_len: usize, visible: usize) {
        let max_offset = log_len.saturating_sub(visible);
        self.log_offset = (self.log_offset + lines).min(max_offset);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.log_offset = self.log_offset.saturating_sub(lines);
    }

    /// Follow the newest log line.
    pub fn scroll_to_bottom(&mut self) {
        self.log_offset = 0;
    }

    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Compose the full screen and write the rows that changed.
    pub fn redraw<S: Display + PartialEq + Clone>(
        &mut self,
        session: &Session<S>,
        log: &[String],
        terminal: &mut dyn Terminal,
    ) {
        let next = self.compose(session, log);
        self.flush_rows(next, terminal);
    }

    fn compose<S: Display + PartialEq + Clone>(
        &self,
        session: &Session<S>,
        log: &[String],
    ) -> Vec<String> {
        let mut rows = render::session_rows(session);
        let visible = self.log_height(rows.len());
        rows.push(format!("Phase: {}", session.phase()));
        rows.push(HELP.to_string());
        rows.push(LOG_TITLE.to_string());

        let end = log.len().saturating_sub(self.log_offset);
        let start = end.saturating_sub(visible);
        rows.extend(log[start..end].iter().cloned());
        rows.resize(rows.len() + visible - (end - start), String::new());

        rows.push(self.message.clone().unwrap_or_default());

        let width = self.size.width as usize;
        rows.truncate(self.size.height as usize);
        rows.into_iter()
            .map(|row| row.chars().take(width).collect::<String>())
            .collect()
    }

    fn flush_rows(&mut self, next: Vec<String>, terminal: &mut dyn Terminal) {
        for (row, line) in next.iter().enumerate() {
            if self.current.get(row) == Some(line) {
                continue;
            }
            terminal.move_cursor(0, row as u16);
            terminal.write_str(line);
            terminal.clear_eol();
        }
        self.current = next;
        terminal.flush();
    }
}
