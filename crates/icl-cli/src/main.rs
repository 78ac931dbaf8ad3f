use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use icl::{Console, ConsoleConfig};
use icl_cli::commands::{DemoState, TODO_LIST, demo_console};
use icl_cli::editor::ConsoleHelper;
use icl_cli::render;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "icl-cli")]
#[command(about = "Interactive command line demo")]
#[command(version)]
struct Args {
    /// Console settings (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Return handler failures instead of printing them
    #[arg(long)]
    no_catch: bool,

    /// File to load line history from and save it to
    #[arg(long)]
    history: Option<PathBuf>,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<ConsoleConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            ConsoleConfig::from_toml_str(&source)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => ConsoleConfig::default(),
    };
    if args.no_catch {
        config.catch_handler_errors = false;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging();

    let config = load_config(&args)?;
    let state = DemoState::new();
    let console = Rc::new(RefCell::new(demo_console(config, &state)?));

    let mut rl: Editor<ConsoleHelper, DefaultHistory> =
        Editor::new().map_err(|e| anyhow!("failed to init rustyline: {e}"))?;
    rl.set_helper(Some(ConsoleHelper::new(Rc::clone(&console))));

    if let Some(path) = &args.history {
        if let Err(e) = rl.load_history(path) {
            debug!("No history loaded from {}: {}", path.display(), e);
        }
    }

    let result = read_loop(&mut rl, &console, &state);

    if let Some(path) = &args.history {
        if let Err(e) = rl.save_history(path) {
            warn!("Failed to save history to {}: {}", path.display(), e);
        }
    }
    result
}

fn read_loop(
    rl: &mut Editor<ConsoleHelper, DefaultHistory>,
    console: &Rc<RefCell<Console>>,
    state: &DemoState,
) -> Result<()> {
    let prompt = console.borrow().config().prompt.clone();

    while !state.quit_requested() {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(e) => return Err(anyhow!("readline error: {e}")),
        };

        if !line.trim().is_empty() {
            rl.add_history_entry(line.as_str())
                .map_err(|e| anyhow!("failed to record history: {e}"))?;
        }

        {
            let console = console.borrow();
            let outcome = console.execute(&line)?;
            if let Some(text) = render::outcome(&outcome, console.registry(), console.config()) {
                println!("{}", text);
            }
        }

        // Handlers may have changed the todos
        console
            .borrow_mut()
            .set_completion_list(TODO_LIST, state.titles());
    }

    Ok(())
}
