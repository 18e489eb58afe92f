use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use graph_coloring::frontend::{Frontend, Reply};
use graph_coloring::{GameConfig, GameEngine};

/// Graph coloring puzzle played from the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Seed for reproducible graphs
    #[arg(long)]
    seed: Option<u64>,

    /// Upper bound on vertices per level
    #[arg(long, default_value_t = GameConfig::default().max_vertices)]
    max_vertices: usize,

    /// Log engine events to stderr (-v debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose > 0 { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();

    let config = GameConfig { max_vertices: args.max_vertices, ..GameConfig::default() };
    config.validate().context("invalid game configuration")?;

    let engine = match args.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };
    let mut frontend = Frontend::new(engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "Type 'start' to begin, 'help' for rules.")?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }
        match frontend.handle_line(&line) {
            Ok(Reply::Print(text)) => writeln!(stdout, "{text}")?,
            Ok(Reply::Quit) => break,
            Err(err) => {
                warn!("Bad input {:?}: {}", line, err);
                writeln!(stdout, "{err}")?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}
