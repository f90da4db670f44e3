//! Taskline - Main Entry Point
//!
//! Reads one command per line from stdin and prints each reply to stdout.
//! The actual implementation is in the `taskline` library.

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taskline::{Config, Session, Storage, logging};
use tracing::warn;

const DIVIDER: &str = "────────────────────────────────────────";

/// Taskline - track todos, deadlines and events from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task data file (overrides the config file)
    file: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset (e.g. warn, info, debug)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .with_overrides(args.file, args.log_level);

    logging::init(&config.log_level);

    let (mut session, banner) = Session::open(Storage::new(&config.data_file));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}\n{}", banner, DIVIDER)?;
    out.flush()?;

    let mut input = io::stdin().lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        }
        let reply = session.handle_bytes(&buf);
        writeln!(out, "{}\n{}", reply.text, DIVIDER)?;
        out.flush()?;
        if reply.exit {
            break;
        }
    }

    Ok(())
}
