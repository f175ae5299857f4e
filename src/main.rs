use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use zcalc::calculator::{Calculator, format_number, tokenize};
use zcalc::config::persistence::default_snapshot_path;
use zcalc::config::{Settings, Snapshot, restore_session, save_snapshot};

/// Keypad calculator. Type keys like `5 + 3 = =` or `30 sin`.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Keys to press. Reads one line of keys at a time from stdin when
    /// omitted.
    keys: Vec<String>,

    /// Settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Saved state file (JSON).
    #[arg(long)]
    state: Option<PathBuf>,

    /// Do not load or save state.
    #[arg(long)]
    no_persist: bool,

    /// Log engine transitions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(cli.config.as_deref());
    let state_path = if cli.no_persist {
        None
    } else {
        cli.state.clone().or_else(default_snapshot_path)
    };

    let (mut calculator, theme) = match &state_path {
        Some(path) => restore_session(path, settings),
        None => (
            Calculator::new(settings.unwrap_or_default()),
            Snapshot::default().theme,
        ),
    };

    if cli.keys.is_empty() {
        run_interactive(&mut calculator)?;
    } else {
        press(&mut calculator, &cli.keys.join(" "));
        print_state(&calculator);
    }

    if let Some(path) = state_path {
        save_snapshot(&path, &Snapshot::capture(&calculator, theme))
            .with_context(|| format!("failed to save state to {}", path.display()))?;
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("zcalc=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Settings from the config file, or `None` when there is no usable file
/// and saved (or default) settings should apply.
fn load_settings(path: Option<&Path>) -> Option<Settings> {
    let loaded = match path {
        Some(path) => Settings::load_from(path).map(Some),
        None => Settings::load(),
    };

    loaded.unwrap_or_else(|err| {
        warn!("{}; ignoring config file", err);
        None
    })
}

fn run_interactive(calculator: &mut Calculator) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print_state(calculator);
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "history" => print_history(calculator),
            "clear history" => {
                calculator.clear_history();
                println!("(history cleared)");
            }
            command if command.starts_with("recall ") => {
                match command["recall ".len()..].trim().parse::<usize>() {
                    Ok(index) if calculator.recall_history(index) => print_state(calculator),
                    _ => eprintln!("error: no such history entry"),
                }
            }
            keys => {
                press(calculator, keys);
                print_state(calculator);
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

/// Feed a line of keys to the calculator, stopping at the first error.
fn press(calculator: &mut Calculator, keys: &str) {
    let inputs = match tokenize(keys) {
        Ok(inputs) => inputs,
        Err(err) => {
            eprintln!("error: {}", err);
            return;
        }
    };

    for input in inputs {
        if let Err(err) = calculator.handle(input) {
            eprintln!("error: {}", err);
            return;
        }
    }
}

fn print_state(calculator: &Calculator) {
    let memory = if calculator.memory_active() { "M " } else { "" };
    println!(
        "[{}{}] {}",
        memory,
        calculator.angle_mode().label(),
        calculator.expression()
    );
    println!("{}", calculator.display());
}

fn print_history(calculator: &Calculator) {
    if calculator.history().is_empty() {
        println!("(no history)");
        return;
    }
    for (index, entry) in calculator.history().iter().enumerate() {
        println!(
            "{:>3}  {} = {}  ({})",
            index,
            entry.expression,
            format_number(entry.result, calculator.settings().thousands_separator),
            entry.timestamp.format("%Y-%m-%d %H:%M:%S")
        );
    }
}
