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
//! Scene stack
//!
//! The front end feeds one stream of [`ActionEvent`]s to whichever scene is
//! on top of the [`SceneStack`]. Scenes answer with a [`SceneCommand`] to
//! push a new scene, pop themselves, or quit; the stack applies it.

mod menu;
mod play;

pub use menu::{MenuEntry, MenuScene};
pub use play::PlayScene;

use crate::error::SimResult;
use log::{debug, info};

/// Logical input actions, already mapped from physical keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move up / previous menu entry
    Up,
    /// Move down / next menu entry
    Down,
    /// Move left
    Left,
    /// Move right / select in menus
    Right,
    /// Swing the sword
    Attack,
    /// Select the highlighted menu entry
    Confirm,
    /// Leave the current scene
    Back,
    /// Toggle pause
    Pause,
    /// Reload the current level
    Restart,
    /// Toggle sprite drawing
    ToggleTextures,
    /// Toggle collision box drawing
    ToggleCollision,
    /// Toggle the player-following camera
    ToggleFollow,
}

/// An action being pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionEvent {
    /// Which action
    pub action: Action,
    /// Pressed (true) or released (false)
    pub pressed: bool,
}

impl ActionEvent {
    /// A press of `action`
    pub fn press(action: Action) -> Self {
        ActionEvent {
            action,
            pressed: true,
        }
    }

    /// A release of `action`
    pub fn release(action: Action) -> Self {
        ActionEvent {
            action,
            pressed: false,
        }
    }
}

/// What the stack should do after a scene handled input or updated
pub enum SceneCommand {
    /// Stay on the current scene
    None,
    /// Put a new scene on top
    Push(Box<dyn Scene>),
    /// Remove the current scene
    Pop,
    /// Stop the game
    Quit,
}

/// A game screen
pub trait Scene {
    /// Name for logging
    fn name(&self) -> &str;

    /// React to one input action
    fn handle_action(&mut self, event: ActionEvent) -> SimResult<SceneCommand>;

    /// Advance one frame
    fn update(&mut self) -> SimResult<SceneCommand>;
}

/// Stack of scenes; the top one is active
#[derive(Default)]
pub struct SceneStack {
    scenes: Vec<Box<dyn Scene>>,
    quit: bool,
}

impl SceneStack {
    /// Create a stack with `root` as the only scene
    pub fn new(root: Box<dyn Scene>) -> Self {
        SceneStack {
            scenes: vec![root],
            quit: false,
        }
    }

    /// Put `scene` on top
    pub fn push(&mut self, scene: Box<dyn Scene>) {
        debug!("Entering scene `{}`", scene.name());
        self.scenes.push(scene);
    }

    /// Remove the top scene
    pub fn pop(&mut self) -> Option<Box<dyn Scene>> {
        let scene = self.scenes.pop();
        if let Some(scene) = &scene {
            debug!("Leaving scene `{}`", scene.name());
        }
        scene
    }

    /// The active scene
    pub fn current(&self) -> Option<&dyn Scene> {
        self.scenes.last().map(|s| s.as_ref())
    }

    /// Number of scenes on the stack
    pub fn depth(&self) -> usize {
        self.scenes.len()
    }

    /// Check whether the game should keep running
    ///
    /// False once a scene asked to quit or the last scene was popped.
    pub fn is_running(&self) -> bool {
        !self.quit && !self.scenes.is_empty()
    }

    /// Route an action to the active scene
    pub fn handle_action(&mut self, event: ActionEvent) -> SimResult<()> {
        let Some(scene) = self.scenes.last_mut() else {
            return Ok(());
        };
        let command = scene.handle_action(event)?;
        self.apply(command);
        Ok(())
    }

    /// Update the active scene
    pub fn update(&mut self) -> SimResult<()> {
        let Some(scene) = self.scenes.last_mut() else {
            return Ok(());
        };
        let command = scene.update()?;
        self.apply(command);
        Ok(())
    }

    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::None => {}
            SceneCommand::Push(scene) => self.push(scene),
            SceneCommand::Pop => {
                self.pop();
            }
            SceneCommand::Quit => {
                info!("Quit requested");
                self.quit = true;
            }
        }
    }
}
