//! HH Football headless driver
//!
//! Runs a demo game on the virtual clock with the autopilot playing offense,
//! logging sound cues, banners and the final score.
//!
//! Usage: hhfootball [--seed N] [--ticks N] [--load PATH] [--save PATH] [--volume V]

use std::path::PathBuf;

use clap::Parser;
use hhfootball::audio::{AudioManager, LogBackend};
use hhfootball::persistence;
use hhfootball::sim::{Game, GameEvent};
use hhfootball::Settings;

#[derive(Parser, Debug)]
#[command(name = "hhfootball")]
#[command(about = "Play a headless game of handheld football on autopilot")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many master ticks even if the game is not over
    #[arg(long = "ticks")]
    max_ticks: Option<u64>,
    /// Resume a saved game
    #[arg(long)]
    load: Option<PathBuf>,
    /// Save the game here when the run ends
    #[arg(long)]
    save: Option<PathBuf>,
    /// Master volume for sound cues, 0.0 - 1.0
    #[arg(long, default_value_t = 1.0)]
    volume: f32,
}

fn handle_events(game: &mut Game, audio: &mut AudioManager<LogBackend>) {
    for event in game.drain_events() {
        match event {
            GameEvent::Sound { cue, looping } => audio.play(cue, looping),
            GameEvent::StopSound(cue) => audio.stop(cue),
            GameEvent::Vibrate { millis } => audio.vibrate(millis),
            GameEvent::Info(message) => log::info!(
                "[{}] {} | {} | {}",
                game.clock_label(),
                message.text(),
                game.drive_status(),
                game.field_position_label()
            ),
            GameEvent::ScoreChanged { home, visitor } => {
                log::info!("Score: home {} visitor {}", home, visitor);
            }
            GameEvent::ClockExpired => log::info!("Period over"),
            GameEvent::ClearInfo | GameEvent::ClockUpdate { .. } => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("HH Football (headless) starting...");

    let args = Args::parse();
    let settings = Settings::load();
    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    });
    log::info!("Game initialized with seed: {}", seed);

    let mut game = match &args.load {
        Some(path) => match persistence::load_from_path(path) {
            Ok(saved) => Game::restore(&saved, &settings, seed),
            Err(e) => {
                log::warn!("Could not load {}: {}, starting a new game", path.display(), e);
                Game::new(&settings, seed)
            }
        },
        None => Game::new(&settings, seed),
    };

    let mut audio = AudioManager::new(LogBackend);
    audio.set_master_volume(args.volume);
    audio.set_muted(!settings.sound);
    audio.set_vibrate(settings.vibrate);

    let mut ticks = 0u64;
    while !game.is_game_over() && args.max_ticks.is_none_or(|max| ticks < max) {
        if let Some(command) = game.demo_command() {
            game.apply(command);
        }
        game.tick();
        handle_events(&mut game, &mut audio);
        ticks += 1;
    }
    handle_events(&mut game, &mut audio);
    audio.release();

    println!(
        "Home {} - Visitor {} ({}, {} ticks)",
        game.home_score(),
        game.visitor_score(),
        if game.is_game_over() { "final" } else { "in progress" },
        ticks
    );

    if let Some(path) = &args.save {
        if let Err(e) = persistence::save_to_path(&game.snapshot(), path) {
            log::warn!("Could not save {}: {}", path.display(), e);
        }
    }
}
