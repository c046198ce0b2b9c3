//! speakpad main entry point
//!
//! The main loop monitors two sources:
//! 1. stdin (user keyboard input) - edits the pad and drives playback
//! 2. the engine event channel - session lifecycle and voice-list changes
//!
//! Both are drained on a single thread; the engine's callbacks only ever
//! send onto the channel.

use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use speakpad::config::Config;
use speakpad::input::{create_default_keymap, DefaultKeyHandler, HandlerStack};
use speakpad::player::Player;
use speakpad::speech::{create_engine, EngineEvent};
use speakpad::terminal::{is_tty, restore_termios, set_raw_mode};
use speakpad::{ui, Result};
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};
use std::process;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to speakpad.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("speakpad.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open speakpad.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "speakpad version {} starting (debug mode, logging to speakpad.log)",
            speakpad::VERSION
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
    debug!("Initializing speakpad");

    // The pad is a keyboard-driven form; it needs a real terminal
    let stdin_fd = io::stdin().as_raw_fd();
    if !is_tty(stdin_fd) {
        eprintln!("Error: speakpad requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Usage: run speakpad directly in a terminal, not through pipes or redirects");
        process::exit(1);
    }

    // Raw mode lets us see individual keypresses and alt chords
    let original_termios = set_raw_mode(stdin_fd)?;

    // Ensure we restore the terminal on every exit path
    let _guard = TermiosGuard {
        fd: stdin_fd,
        termios: original_termios,
    };

    // Engine lifecycle events arrive on this channel; callbacks fire on a
    // platform thread and only ever send
    let (event_tx, event_rx) = mpsc::channel();

    // A missing platform synthesizer is not fatal: the pad runs with
    // playback actions degraded to no-ops
    let engine = match create_engine(event_tx) {
        Ok(engine) => Some(engine),
        Err(e) => {
            info!("Speech engine unavailable: {}", e);
            None
        }
    };

    let mut player = Player::new(engine);

    // Startup defaults from ~/.speakpad.cfg; a broken config file is
    // logged and ignored
    match Config::load() {
        Ok(config) => {
            info!("Configuration loaded from {:?}", config.path());
            player.attach_config(config);
        }
        Err(e) => {
            error!("Failed to load config: {}", e);
        }
    }

    // Single handler stack with the default handler at the bottom; modal
    // handlers (settings, value prompts) are pushed on top of it
    let keymap = create_default_keymap();
    info!("Key handler initialized with {} bindings", keymap.len());
    let mut handlers = HandlerStack::new();
    handlers.push(Box::new(DefaultKeyHandler::new(keymap)));

    // Set up the event loop: poll stdin, drain the engine channel on a
    // short timeout
    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);
    let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
    poll.registry()
        .register(&mut stdin_source, STDIN, Interest::READABLE)?;

    info!("speakpad ready - entering event loop");
    ui::render(&player)?;

    loop {
        // Engine callbacks first so the form reflects them promptly
        if drain_engine_events(&mut player, &event_rx) {
            ui::render(&player)?;
        }

        poll.poll(&mut events, Some(Duration::from_millis(100)))?;

        for event in events.iter() {
            if event.token() == STDIN {
                match handle_stdin(&mut player, &mut handlers) {
                    Ok(true) => {
                        debug!("Exit requested");
                        return Ok(());
                    }
                    Ok(false) => ui::render(&player)?,
                    Err(e) => {
                        error!("stdin error: {}", e);
                        return Ok(());
                    }
                }
            }
        }
    }
}

/// Feed pending engine events into the player; true if any arrived
fn drain_engine_events(player: &mut Player, event_rx: &Receiver<EngineEvent>) -> bool {
    let mut any = false;
    while let Ok(event) = event_rx.try_recv() {
        debug!("Engine event: {:?}", event);
        player.handle_event(event);
        any = true;
    }
    any
}

/// Handle user input from stdin
///
/// Returns true when the user asked to quit.
fn handle_stdin(player: &mut Player, handlers: &mut HandlerStack) -> Result<bool> {
    let mut buf = [0u8; 4096];

    let n = io::stdin().read(&mut buf)?;
    if n == 0 {
        return Ok(false);
    }

    handlers.process(&buf[..n], player)
}

/// RAII guard to restore terminal on exit
///
/// Ensures the terminal is returned to normal mode even on a crash
struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
