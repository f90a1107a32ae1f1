use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;

use kmp_stepper::app::App;
use kmp_stepper::screen::Screen;
use kmp_stepper::terminal::{CrosstermTerminal, Terminal};
use kmp_stepper::{ExecOutcome, Session, compile, execute};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to search
    #[arg(short = 't', long, default_value = "ABABDABABCABABABACDABABCABAB")]
    text: String,

    /// Pattern to search for
    #[arg(short = 'p', long, default_value = "ABABCABAB")]
    pattern: String,

    /// Batch mode: read a command script from stdin
    #[arg(short = 'M', long)]
    batch: bool,

    /// Read a command script from FILE (implies batch mode)
    #[arg(short = 'i', long, value_name = "FILE")]
    script: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let session = Session::from_strs(&args.pattern, &args.text);
    log::info!(
        "pattern {:?} ({} symbols), text {:?} ({} symbols)",
        args.pattern,
        session.pattern().len(),
        args.text,
        session.text().len()
    );

    if args.batch || args.script.is_some() {
        run_batch(session, args.script.as_deref())
    } else {
        run_interactive(session)
    }
}

fn run_batch(mut session: Session<char>, script: Option<&str>) -> Result<()> {
    let source = match script {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?
        }
        None => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            source
        }
    };

    let commands = compile(&source)?;
    let mut stdout = io::stdout().lock();
    match execute(&mut session, &commands, &mut stdout)? {
        ExecOutcome::Success => Ok(()),
        ExecOutcome::Failure(err) => {
            writeln!(stdout, "\x07COMMAND FAILED: {}", err)?;
            stdout.flush()?;
            std::process::exit(1);
        }
    }
}

fn run_interactive(session: Session<char>) -> Result<()> {
    let mut terminal = CrosstermTerminal::default();
    let screen = Screen::new(terminal.size());
    let mut app = App::new(session, screen);
    app.run(&mut terminal)
}
