// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Headless runner: loads a level and plays it for a number of frames

use clap::{Parser, ValueEnum};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tilequest::animation::AnimationLibrary;
use tilequest::config::GameConfig;
use tilequest::level::{missing_clips, LevelDescription};
use tilequest::scene::{Action, ActionEvent, PlayScene, Scene};
use tilequest::SimResult;

/// Direction to hold for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Action::Up,
            Direction::Down => Action::Down,
            Direction::Left => Action::Left,
            Direction::Right => Action::Right,
        }
    }
}

/// Tile Quest headless simulation
#[derive(Parser)]
#[command(version, about = "Runs a Tile Quest level without a window")]
struct Cli {
    /// INI configuration file; defaults are used if it is missing
    #[arg(long, value_name = "PATH", default_value = "config.ini")]
    config: PathBuf,

    /// Animation asset description
    #[arg(long, value_name = "PATH", default_value = "assets/animations.txt")]
    assets: PathBuf,

    /// Level description
    #[arg(long, value_name = "PATH", default_value = "assets/level1.txt")]
    level: PathBuf,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Hold a direction for the whole run (repeatable)
    #[arg(long, value_enum)]
    hold: Vec<Direction>,

    /// Swing the sword every N frames (at least every second frame)
    #[arg(long, value_name = "N")]
    attack_every: Option<u64>,

    /// Print the final frame as JSON
    #[arg(long)]
    dump: bool,
}

/// Attack press state for `frame` when swinging every `every` frames
///
/// The attack is released on the frames in between, so a new swing can
/// start; a period below 2 would never release it.
fn attack_pressed(frame: u64, every: u64) -> bool {
    frame % every.max(2) == 0
}

fn run(cli: &Cli) -> SimResult<()> {
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}, using defaults", e);
    }

    let animations = Arc::new(AnimationLibrary::load(&cli.assets)?);
    let level = LevelDescription::load(&cli.level)?;
    let missing = missing_clips(&level, &animations);
    if !missing.is_empty() {
        warn!("Level uses undefined clips: {}", missing.join(", "));
    }

    let mut scene = PlayScene::new(level, animations, &config)?;
    for direction in &cli.hold {
        scene.handle_action(ActionEvent::press((*direction).into()))?;
    }

    for frame in 0..cli.frames {
        if let Some(every) = cli.attack_every.filter(|n| *n > 0) {
            scene.handle_action(ActionEvent {
                action: Action::Attack,
                pressed: attack_pressed(frame, every),
            })?;
        }
        scene.update()?;
    }

    let snapshot = scene.snapshot()?;
    info!(
        "Finished {} frames at {}ms with {} entities",
        scene.simulation().frame(),
        snapshot.time_ms,
        snapshot.items.len()
    );

    if cli.dump {
        let output = serde_json::json!({
            "options": scene.options(),
            "snapshot": snapshot,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => warn!("Failed to serialise snapshot: {}", e),
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
