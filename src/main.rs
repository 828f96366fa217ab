//! polysay entry point
//!
//! Sets up logging and the raw-mode terminal, then loops reading single
//! keypresses into the app until the user quits.

use log::{debug, error, info};
use nix::libc;
use polysay::app::{App, KeyAction};
use polysay::config::Config;
use polysay::term::{set_raw_mode, TermiosGuard};
use polysay::Result;
use std::io::{self, Read};
use std::os::unix::io::AsRawFd;
use std::process;

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to polysay.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("polysay.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open polysay.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "polysay {} starting (debug mode, logging to polysay.log)",
            polysay::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    debug!("Initializing polysay");

    // Single-key selection needs an interactive terminal
    let stdin_fd = io::stdin().as_raw_fd();
    if unsafe { libc::isatty(stdin_fd) } == 0 {
        eprintln!("Error: polysay requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Usage: run polysay directly in a terminal, not through pipes or redirects");
        process::exit(1);
    }

    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let mut app = App::new(&config);

    let original_termios = set_raw_mode(stdin_fd)?;
    let _guard = TermiosGuard::new(stdin_fd, original_termios);

    app.show_welcome();

    // Key loop: one blocking read at a time. Each dispatch runs to
    // completion before the next key is handled, so a new selection can
    // never interleave with an older one.
    let mut buf = [0u8; 16];
    loop {
        let n = io::stdin().read(&mut buf)?;
        if n == 0 {
            break;
        }

        for &key in &buf[..n] {
            if app.handle_key(key) == KeyAction::Quit {
                app.shutdown();
                info!("polysay exiting");
                return Ok(());
            }
        }
    }

    app.shutdown();
    Ok(())
}
