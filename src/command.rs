//! Batch command scripts.
//!
//! A script is a list of commands separated by whitespace, `;` or newlines.
//! Each command is a name with an optional repeat count, e.g. `9l 3s n`.
//! Everything after `#` on a line is a comment.
//!
//! | Command          | Action                                  |
//! |------------------|-----------------------------------------|
//! | `l`, `lps`       | Step the LPS computation                |
//! | `s`, `search`    | Step the search                         |
//! | `n`, `step`      | Step whichever phase is current         |
//! | `r`, `reset`     | Discard progress, keep pattern and text |
//! | `p`, `print`     | Print the text/pattern/LPS rows         |
//! | `m`, `matches`   | Print the matches found so far          |

use std::fmt::Display;
use std::io::Write;

use anyhow::{Result, anyhow, bail};
use itertools::Itertools;
use phf::{Map, phf_map};

use crate::error::StepError;
use crate::render;
use crate::session::Session;

/// Opcode of a script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmdOp {
    StepLps,
    StepSearch,
    Step,
    Reset,
    Print,
    Matches,
}

/// A compiled script command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub op: CmdOp,
    pub repeat: usize,
}

/// How a script run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    Success,
    Failure(StepError),
}

/// Keep names sorted alphabetically.
const NAME_TO_OP_MAP: Map<&'static str, CmdOp> = phf_map! {
    "l" => CmdOp::StepLps,
    "lps" => CmdOp::StepLps,
    "m" => CmdOp::Matches,
    "matches" => CmdOp::Matches,
    "n" => CmdOp::Step,
    "p" => CmdOp::Print,
    "print" => CmdOp::Print,
    "r" => CmdOp::Reset,
    "reset" => CmdOp::Reset,
    "s" => CmdOp::StepSearch,
    "search" => CmdOp::StepSearch,
    "step" => CmdOp::Step,
};

/// Compile a script into commands.
pub fn compile(input: &str) -> Result<Vec<Command>> {
    input
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split(|ch: char| ch.is_whitespace() || ch == ';'))
        .filter(|token| !token.is_empty())
        .map(compile_token)
        .collect()
}

fn compile_token(token: &str) -> Result<Command> {
    let name_start = token
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(token.len());
    let (count, name) = token.split_at(name_start);

    if name.is_empty() {
        bail!("Syntax error: count {} has no command.", count);
    }
    let repeat = if count.is_empty() {
        1
    } else {
        count
            .parse::<usize>()
            .map_err(|_| anyhow!("Syntax error: invalid count '{}'.", count))?
    };
    if repeat == 0 {
        bail!("Syntax error: repeat count must be positive.");
    }

    let op = NAME_TO_OP_MAP
        .get(name.to_ascii_lowercase().as_str())
        .copied()
        .ok_or_else(|| anyhow!("Syntax error: unknown command '{}'.", name.to_uppercase()))?;
    Ok(Command { op, repeat })
}

/// Run compiled commands against `session`, writing one line per event.
///
/// Stops at the first refused step and reports it as a failure; I/O errors
/// on `out` are returned as errors.
pub fn execute<S, W>(
    session: &mut Session<S>,
    commands: &[Command],
    out: &mut W,
) -> Result<ExecOutcome>
where
    S: Display + PartialEq + Clone,
    W: Write,
{
    for command in commands {
        for _ in 0..command.repeat {
            let result = match command.op {
                CmdOp::StepLps => session.step_lps(),
                CmdOp::StepSearch => session.step_search(),
                CmdOp::Step => session.step(),
                CmdOp::Reset => {
                    session.restart();
                    writeln!(out, "Reset.")?;
                    continue;
                }
                CmdOp::Print => {
                    for row in render::session_rows(session) {
                        writeln!(out, "{}", row.trim_end())?;
                    }
                    continue;
                }
                CmdOp::Matches => {
                    writeln!(out, "Matches: {}", session.matches().iter().format(", "))?;
                    continue;
                }
            };
            match result {
                Ok(event) => writeln!(out, "{}", event)?,
                Err(err) => {
                    log::debug!("script stopped at {:?}: {}", command, err);
                    return Ok(ExecOutcome::Failure(err));
                }
            }
        }
    }
    Ok(ExecOutcome::Success)
}
