use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use sky_shooter::audio::{play_events, BellSink, LogSink, Silent, ToneSink};
use sky_shooter::compute::{apply_action, init_state, tick};
use sky_shooter::config::{AudioMode, Config};
use sky_shooter::display;
use sky_shooter::entities::GameStatus;
use sky_shooter::input::{command_for, Command, KeyTracker};
use sky_shooter::render::{render, Surface};

#[derive(Parser, Debug)]
#[command(name = "sky_shooter", about = "Vertical arcade shooter for the terminal")]
struct Args {
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum)]
    audio: Option<AudioMode>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(audio) = args.audio {
        config.audio = audio;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = log_file.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Logs go to a file; stdout belongs to the game screen.
fn init_logging(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn tone_sink(mode: AudioMode) -> Box<dyn ToneSink> {
    match mode {
        AudioMode::Log => Box::new(LogSink),
        AudioMode::Bell => Box::new(BellSink::new(stdout())),
        AudioMode::Off => Box::new(Silent),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame: drain input, tick while
/// playing, render, present, sleep out the rest of the frame.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
    sink: &mut dyn ToneSink,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_budget = Duration::from_millis(config.frame_ms());
    let clock = Instant::now();

    let mut state = init_state(&mut rng);
    let mut keys = KeyTracker::new(config.fps);
    let (width, height) = terminal::size()?;
    let (cols, rows) = display::surface_size(width, height);
    let mut surface = Surface::new(cols, rows);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        keys.press(code, frame);
                        match command_for(code, modifiers, state.status) {
                            Some(Command::Quit) => {
                                tracing::info!(score = state.score, "quit");
                                return Ok(());
                            }
                            Some(Command::Game(action)) => {
                                let before = state.status;
                                state = apply_action(&state, action);
                                keys.settle(before, state.status);
                            }
                            None => {}
                        }
                    }
                    KeyEventKind::Repeat => keys.press(code, frame),
                    KeyEventKind::Release => keys.release(code),
                },
                Event::Resize(width, height) => {
                    let (cols, rows) = display::surface_size(width, height);
                    surface = Surface::new(cols, rows);
                    out.queue(terminal::Clear(terminal::ClearType::All))?;
                    tracing::debug!(cols, rows, "resized");
                }
                _ => {}
            }
        }

        if state.status == GameStatus::Playing {
            let controls = keys.controls(frame);
            let now_ms = clock.elapsed().as_millis() as u64;
            state = tick(&state, &controls, now_ms, &mut rng);
            play_events(sink, &state.events);
        }

        render(&state, &mut surface, &mut rng);
        display::present(out, &surface, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;
    tracing::info!(fps = config.fps, seed = ?config.seed, audio = ?config.audio, "starting");

    let mut sink = tone_sink(config.audio);
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                tracing::warn!(%err, "input thread stopped");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, sink.as_mut());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result.context("running game loop")
}
