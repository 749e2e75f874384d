//! Letter Drop entry point
//!
//! Runs a headless session driven by the demo player and prints the results.

use std::error::Error;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::Parser;

use letter_drop::consts::{SIM_DT, TARGET_FPS};
use letter_drop::platform::{FrameTimer, MonotonicClock, map_keys};
use letter_drop::renderer::hud::format_thousands;
use letter_drop::renderer::{FrameView, HeadlessRenderer, Renderer};
use letter_drop::report::ScoreReveal;
use letter_drop::sim::{AutoPlayer, SessionState, TickInput, tick};
use letter_drop::{AudioManager, CuePlayer, Difficulty, RunReport, Settings};

/// Log the HUD every few seconds of play
const HUD_LOG_EVERY: u64 = 5 * TARGET_FPS as u64;
/// Frames between demo keystrokes
const AUTOPLAY_REACTION_FRAMES: u32 = 20;
/// Keeps the demo player's rolls independent of the session's
const AUTOPLAY_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// falling-letter arcade typing game, played headlessly by a demo typist
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// settings file (JSON); missing fields take defaults
    #[arg(long)]
    settings: Option<PathBuf>,

    /// difficulty preset: easy, medium or hard
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// RNG seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// game length in seconds
    #[arg(long)]
    duration: Option<f32>,

    /// pace the run at wall-clock speed instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// play yourself: type key names on stdin ("a b up down esc") and press enter
    #[arg(short, long)]
    interactive: bool,

    /// demo typist hit rate (0.0 - 1.0)
    #[arg(short, long, default_value_t = 0.85, value_parser = parse_accuracy)]
    accuracy: f32,

    /// directory with cue samples (correct.wav, miss.ogg, ...)
    #[arg(long)]
    sounds: Option<PathBuf>,

    /// print the report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, medium, hard)"))
}

fn parse_accuracy(s: &str) -> Result<f32, String> {
    let accuracy: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&accuracy) {
        Ok(accuracy)
    } else {
        Err(format!("accuracy must be between 0.0 and 1.0, got {s}"))
    }
}

/// Forward stdin lines from a background thread
fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Key names typed since the last frame
fn typed_input(lines: &mpsc::Receiver<String>) -> TickInput {
    let mut events = Vec::new();
    while let Ok(line) = lines.try_recv() {
        events.extend(map_keys(line.split_whitespace()));
    }
    TickInput::new(events)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(duration) = cli.duration {
        settings.duration_secs = duration;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    let seed = settings.seed.unwrap_or_else(rand::random);

    log::info!(
        "Letter Drop starting: {} difficulty, seed {}",
        settings.difficulty.as_str(),
        seed
    );

    let mut state = SessionState::new(settings.session_config(seed));
    let mut player = AutoPlayer::new(seed ^ AUTOPLAY_SEED_SALT, cli.accuracy, AUTOPLAY_REACTION_FRAMES);
    let mut renderer = HeadlessRenderer::new(HUD_LOG_EVERY);
    let mut audio = match &cli.sounds {
        Some(dir) => AudioManager::new().with_sample_dir(dir),
        None => AudioManager::new(),
    };
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);
    let shake = settings.effective_screen_shake();

    if cli.realtime || cli.interactive {
        let lines = cli.interactive.then(spawn_line_reader);
        let clock = MonotonicClock::new();
        let mut timer = FrameTimer::start(&clock);
        let frame = Duration::from_secs_f32(SIM_DT);
        while !state.is_finished() {
            thread::sleep(frame);
            let dt = timer.next_dt(&clock);
            let input = match &lines {
                Some(lines) => typed_input(lines),
                None => player.next_input(&state),
            };
            tick(&mut state, &input, dt);
            renderer.render(&FrameView::capture(&state, shake));
            audio.play_all(state.drain_cues());
        }

        // Count the final score up like the results screen does
        let mut reveal = ScoreReveal::new();
        let mut frames = 0u32;
        while !reveal.is_done() {
            thread::sleep(frame);
            reveal.advance(timer.next_dt(&clock));
            frames += 1;
            if frames % (TARGET_FPS as u32 / 2) == 0 || reveal.is_done() {
                log::info!("Score: {}", format_thousands(reveal.displayed(state.score)));
            }
        }
    } else {
        while !state.is_finished() {
            let input = player.next_input(&state);
            tick(&mut state, &input, SIM_DT);
            renderer.render(&FrameView::capture(&state, shake));
            audio.play_all(state.drain_cues());
        }
    }

    log::info!(
        "Rendered {} frames (peak {} entities), played {} cues",
        renderer.frames(),
        renderer.peak_entities(),
        audio.total_played()
    );

    let report = RunReport::from_session(&state);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}
