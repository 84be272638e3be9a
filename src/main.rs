//! Planet Breaker headless runner
//!
//! Plays the simulation with the demo autopilot for a fixed number of ticks,
//! logging progress, and optionally prints the final frame as JSON.
//!
//! Usage:
//!   cargo run --release -- --ticks 7200 --seed 42 --quality low --dump

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use planet_breaker::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use planet_breaker::sim::{GameEvent, GameWorld, TickInput, tick};
use planet_breaker::{Bounds, QualityPreset, Settings, Tuning};

/// One simulated minute at 60 ticks per second
const DEFAULT_TICKS: u64 = 3600;
const PROGRESS_INTERVAL: u64 = 600;

#[derive(Parser, Debug)]
#[command(name = "planet-breaker")]
#[command(about = "Run the Planet Breaker simulation headless under the demo autopilot")]
struct Options {
    /// Number of ticks to simulate
    #[arg(long, default_value_t = DEFAULT_TICKS)]
    ticks: u64,
    /// World seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Play area width
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_parser = positive)]
    width: f32,
    /// Play area height
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_parser = positive)]
    height: f32,
    /// Gameplay tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Presentation settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Quality preset applied on top of the settings file
    #[arg(long, value_enum)]
    quality: Option<CliQuality>,
    /// Print the final frame as JSON
    #[arg(long, default_value_t = false)]
    dump: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliQuality {
    Low,
    #[value(alias = "med")]
    Medium,
    High,
}

impl From<CliQuality> for QualityPreset {
    fn from(value: CliQuality) -> Self {
        match value {
            CliQuality::Low => QualityPreset::Low,
            CliQuality::Medium => QualityPreset::Medium,
            CliQuality::High => QualityPreset::High,
        }
    }
}

fn positive(s: &str) -> Result<f32, String> {
    let value: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err("play area must have a positive size".to_string())
    }
}

fn run(options: Options) -> Result<()> {
    let bounds = Bounds::new(options.width, options.height);
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut settings = match &options.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(quality) = options.quality {
        settings.apply_preset(quality.into());
    }

    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!(
        "Planet Breaker (headless) starting: seed {}, {} ticks, quality {}",
        seed,
        options.ticks,
        settings.quality.as_str()
    );

    let mut world = GameWorld::with_config(seed, bounds, tuning, settings);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut kills = 0u64;
    let mut bosses = 0u64;
    let mut runs = 1u64;
    let mut best_score = 0u64;

    for _ in 0..options.ticks {
        tick(&mut world, &input, bounds);

        for event in &world.events {
            match event {
                GameEvent::AsteroidDestroyed { .. } => kills += 1,
                GameEvent::BossDestroyed { .. } => bosses += 1,
                GameEvent::Restarted => runs += 1,
                _ => {}
            }
        }
        best_score = best_score.max(world.session.score);

        if world.time_ticks % PROGRESS_INTERVAL == 0 {
            log::info!(
                "tick {}: level {}, score {}, lives {}, asteroids {}, bullets {}",
                world.time_ticks,
                world.session.level,
                world.session.score,
                world.session.lives,
                world.asteroids.len(),
                world.bullets.len()
            );
        }
    }

    log::info!(
        "Finished after {} ticks: {} asteroids and {} bosses destroyed over {} run(s), \
         best score {}",
        world.time_ticks,
        kills,
        bosses,
        runs,
        best_score
    );

    if options.dump {
        let json = serde_json::to_string_pretty(&world.snapshot())
            .context("serializing final snapshot")?;
        println!("{json}");
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    run(Options::parse())
}
