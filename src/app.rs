//! Application event loop for interactive mode.
//!
//! The `App` struct ties together the Session, Screen, Terminal, and key
//! bindings into a main event loop.

use anyhow::Result;

use crate::error::StepError;
use crate::keybind::{self, KeyAction};
use crate::screen::Screen;
use crate::session::{Session, StepEvent};
use crate::terminal::Terminal;

/// The interactive application state.
pub struct App {
    pub session: Session<char>,
    pub screen: Screen,
    /// Status lines, oldest first.
    pub log: Vec<String>,
    pub running: bool,
}

impl App {
    pub fn new(session: Session<char>, screen: Screen) -> Self {
        Self {
            session,
            screen,
            log: Vec::new(),
            running: true,
        }
    }

    /// Run the main event loop.
    pub fn run(&mut self, terminal: &mut dyn Terminal) -> Result<()> {
        terminal.init()?;
        terminal.clear_screen();
        self.screen.resize(terminal.size());

        let result = self.event_loop(terminal);
        terminal.cleanup()?;
        result
    }

    fn event_loop(&mut self, terminal: &mut dyn Terminal) -> Result<()> {
        while self.running {
            self.screen.redraw(&self.session, &self.log, terminal);
            let key = terminal.read_key()?;
            let action = keybind::resolve_key(key);
            self.handle_action(action, terminal);
        }
        Ok(())
    }

    /// Handle a resolved key action.
    pub fn handle_action(&mut self, action: KeyAction, terminal: &mut dyn Terminal) {
        self.screen.clear_message();

        match action {
            KeyAction::StepLps => {
                let result = self.session.step_lps();
                self.apply(result, terminal);
            }
            KeyAction::StepSearch => {
                let result = self.session.step_search();
                self.apply(result, terminal);
            }
            KeyAction::Step => {
                let result = self.session.step();
                self.apply(result, terminal);
            }
            KeyAction::Reset => {
                self.session.restart();
                self.log.clear();
                self.screen.scroll_to_bottom();
                self.screen.show_message("Reset.");
            }
            KeyAction::ScrollUp => self.scroll_up(1),
            KeyAction::ScrollDown => self.screen.scroll_down(1),
            KeyAction::PageUp => self.scroll_up(self.page()),
            KeyAction::PageDown => self.screen.scroll_down(self.page()),
            KeyAction::Quit => {
                self.running = false;
            }
            KeyAction::Resize => {
                self.screen.resize(terminal.size());
                terminal.clear_screen();
            }
            KeyAction::Ignore => {}
        }
    }

    /// Record a step's event in the log, or report why it was refused.
    fn apply(&mut self, result: Result<StepEvent, StepError>, terminal: &mut dyn Terminal) {
        match result {
            Ok(event) => {
                self.log.push(event.to_string());
                self.screen.scroll_to_bottom();
            }
            Err(err) => {
                log::debug!("step refused: {}", err);
                self.screen.show_message(&format!("Error: {}", err));
                terminal.beep();
            }
        }
    }

    fn page(&self) -> usize {
        self.screen
            .log_height(crate::render::session_rows(&self.session).len())
            .max(1)
    }

    fn scroll_up(&mut self, lines: usize) {
        let visible = self.page();
        self.screen.scroll_up(lines, self.log.len(), visible);
    }
}
