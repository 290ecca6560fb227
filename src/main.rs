//! # fake-emb
//!
//! `fake-emb` makes a separately launched game window look docked inside an
//! editor: it finds the game's window by class, reparents it under the
//! editor window, strips its frame and pins it to a dock rect.
//!
//! ## Quick Start
//! ```sh
//! fake-emb list
//! fake-emb follow --parent-pid 1234 --rect 0,0,1280,720
//! ```

use anyhow::Result;
use clap::Parser;
use fake_emb::e_commands;
use fake_emb::prelude::*;
use fake_emb::{Cli, Command, Config};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.verbose {
        config.verbose = true;
    }
    if let Some(class) = &cli.target_class {
        config.target_class = class.clone();
    }
    config.validate()?;
    init_logging(config.verbose);
    debug!("CLI options: {:?}", cli);

    let mut out = std::io::stdout().lock();
    if e_commands::run_offline(&cli.command, &config, &mut out)? {
        return Ok(());
    }
    run_windowed(&cli.command, &config, &mut out)
}

#[cfg(windows)]
fn run_windowed(command: &Command, config: &Config, out: &mut impl Write) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_for_handler = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        eprintln!("Ctrl+C pressed, stopping...");
        stop_for_handler.store(true, Ordering::SeqCst);
    })?;
    let ws = fake_emb::Win32WindowSystem::new();
    e_commands::run_command(&ws, command, config, out, &stop)
}

#[cfg(not(windows))]
fn run_windowed(command: &Command, _config: &Config, _out: &mut impl Write) -> Result<()> {
    anyhow::bail!(
        "{:?} needs the Win32 window manager; only `placement` and `config` work here",
        command
    )
}
