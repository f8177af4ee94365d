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
//! Headless walkthrough of the scene stack
//!
//! Opens the level select menu, picks the first level, walks the player
//! right while swinging the sword, then backs out to the menu and quits.

use std::path::Path;
use std::sync::Arc;
use tilequest::animation::AnimationLibrary;
use tilequest::config::GameConfig;
use tilequest::scene::{Action, ActionEvent, MenuEntry, MenuScene, SceneStack};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Tile Quest - Headless Example");
    println!("=============================\n");

    let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    let animations = Arc::new(AnimationLibrary::load(assets.join("animations.txt"))?);
    println!("Loaded {} animation clips", animations.len());

    let menu = MenuScene::new(
        "Tile Quest",
        vec![MenuEntry::new("Level  1", assets.join("level1.txt"))],
        animations,
        GameConfig::new(),
    );
    let mut stack = SceneStack::new(Box::new(menu));

    stack.handle_action(ActionEvent::press(Action::Confirm))?;
    println!(
        "Active scene: {}",
        stack.current().map_or("none", |s| s.name())
    );

    stack.handle_action(ActionEvent::press(Action::Right))?;
    for frame in 0..120 {
        let swing = frame % 20 == 0;
        stack.handle_action(ActionEvent {
            action: Action::Attack,
            pressed: swing,
        })?;
        stack.update()?;
    }
    println!("Simulated 120 frames");

    stack.handle_action(ActionEvent::press(Action::Back))?;
    println!(
        "Back in: {}",
        stack.current().map_or("none", |s| s.name())
    );

    stack.handle_action(ActionEvent::press(Action::Back))?;
    println!("Running: {}", stack.is_running());
    Ok(())
}
