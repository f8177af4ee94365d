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
//! Gameplay scene

use super::{Action, ActionEvent, Scene, SceneCommand};
use crate::animation::AnimationLibrary;
use crate::config::GameConfig;
use crate::ecs::components::InputState;
use crate::error::SimResult;
use crate::level::LevelDescription;
use crate::render::{RenderOptions, RenderSnapshot};
use crate::simulation::Simulation;
use log::info;
use std::sync::Arc;

/// A level being played
///
/// Keeps the parsed level around so a restart rebuilds the world from the
/// same description without touching the disk.
pub struct PlayScene {
    level: LevelDescription,
    animations: Arc<AnimationLibrary>,
    config: GameConfig,
    simulation: Simulation,
    input: InputState,
    paused: bool,
    options: RenderOptions,
}

impl PlayScene {
    /// Start playing `level`
    pub fn new(
        level: LevelDescription,
        animations: Arc<AnimationLibrary>,
        config: &GameConfig,
    ) -> SimResult<Self> {
        let simulation = Simulation::create_level(&level, Arc::clone(&animations), config)?;
        Ok(PlayScene {
            level,
            animations,
            config: config.clone(),
            simulation,
            input: InputState::default(),
            paused: false,
            options: RenderOptions::from(config),
        })
    }

    /// The running simulation
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Check whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current debug and camera switches
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render records for the current frame
    pub fn snapshot(&self) -> SimResult<RenderSnapshot> {
        self.simulation
            .world()
            .render_snapshot(self.options.follow_camera)
    }

    /// Rebuild the world from the level description
    pub fn restart(&mut self) -> SimResult<()> {
        self.simulation =
            Simulation::create_level(&self.level, Arc::clone(&self.animations), &self.config)?;
        self.input = InputState::default();
        info!("Level restarted");
        Ok(())
    }
}

impl Scene for PlayScene {
    fn name(&self) -> &str {
        "play"
    }

    fn handle_action(&mut self, event: ActionEvent) -> SimResult<SceneCommand> {
        let pressed = event.pressed;
        match event.action {
            Action::Up => self.input.up = pressed,
            Action::Down => self.input.down = pressed,
            Action::Left => self.input.left = pressed,
            Action::Right => self.input.right = pressed,
            Action::Attack => self.input.attack = pressed,
            _ if !pressed => {}
            Action::Pause => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            Action::Restart => self.restart()?,
            Action::ToggleTextures => self.options.draw_textures = !self.options.draw_textures,
            Action::ToggleCollision => {
                self.options.draw_collision = !self.options.draw_collision;
            }
            Action::ToggleFollow => self.options.follow_camera = !self.options.follow_camera,
            Action::Back => return Ok(SceneCommand::Pop),
            Action::Confirm => {}
        }
        Ok(SceneCommand::None)
    }

    fn update(&mut self) -> SimResult<SceneCommand> {
        self.simulation.advance_frame(&self.input, self.paused)?;
        Ok(SceneCommand::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_library;

    fn play() -> PlayScene {
        let level = LevelDescription::parse("Player 100 100 12 12 5").unwrap();
        PlayScene::new(level, Arc::new(test_library()), &GameConfig::new()).unwrap()
    }

    #[test]
    fn test_direction_press_and_release() {
        let mut scene = play();
        scene.handle_action(ActionEvent::press(Action::Right)).unwrap();
        scene.update().unwrap();
        scene.handle_action(ActionEvent::release(Action::Right)).unwrap();
        scene.update().unwrap();
        let pos = scene.simulation().world().player_transform().unwrap().pos;
        assert_eq!(pos.x, 105.0);
    }

    #[test]
    fn test_pause_toggles_on_press_only() {
        let mut scene = play();
        scene.handle_action(ActionEvent::press(Action::Pause)).unwrap();
        scene.handle_action(ActionEvent::release(Action::Pause)).unwrap();
        assert!(scene.is_paused());

        scene.handle_action(ActionEvent::press(Action::Down)).unwrap();
        scene.update().unwrap();
        let pos = scene.simulation().world().player_transform().unwrap().pos;
        assert_eq!(pos.y, 100.0);

        scene.handle_action(ActionEvent::press(Action::Pause)).unwrap();
        scene.update().unwrap();
        let pos = scene.simulation().world().player_transform().unwrap().pos;
        assert_eq!(pos.y, 105.0);
    }

    #[test]
    fn test_restart_rebuilds_world() {
        let mut scene = play();
        scene.handle_action(ActionEvent::press(Action::Left)).unwrap();
        for _ in 0..5 {
            scene.update().unwrap();
        }
        scene.handle_action(ActionEvent::press(Action::Restart)).unwrap();
        assert_eq!(scene.simulation().frame(), 0);
        let pos = scene.simulation().world().player_transform().unwrap().pos;
        assert_eq!(pos.x, 100.0);
    }

    #[test]
    fn test_debug_toggles() {
        let mut scene = play();
        let before = scene.options();
        scene.handle_action(ActionEvent::press(Action::ToggleCollision)).unwrap();
        scene.handle_action(ActionEvent::press(Action::ToggleFollow)).unwrap();
        scene.handle_action(ActionEvent::press(Action::ToggleTextures)).unwrap();
        let after = scene.options();
        assert_ne!(before.draw_collision, after.draw_collision);
        assert_ne!(before.follow_camera, after.follow_camera);
        assert_ne!(before.draw_textures, after.draw_textures);

        scene.update().unwrap();
        let snapshot = scene.snapshot().unwrap();
        assert_eq!(
            snapshot.camera,
            scene.simulation().world().player_transform().unwrap().pos
        );
    }

    #[test]
    fn test_back_pops() {
        let mut scene = play();
        let command = scene.handle_action(ActionEvent::press(Action::Back)).unwrap();
        assert!(matches!(command, SceneCommand::Pop));
    }
}
