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
//! Level select menu

use super::{Action, ActionEvent, PlayScene, Scene, SceneCommand};
use crate::animation::AnimationLibrary;
use crate::config::GameConfig;
use crate::error::SimResult;
use crate::level::LevelDescription;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

/// One selectable level
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry {
    /// Text shown in the menu
    pub label: String,
    /// Level description file
    pub level_path: PathBuf,
}

impl MenuEntry {
    /// Create an entry
    pub fn new(label: impl Into<String>, level_path: impl Into<PathBuf>) -> Self {
        MenuEntry {
            label: label.into(),
            level_path: level_path.into(),
        }
    }
}

/// Title plus a wrapping list of levels
pub struct MenuScene {
    title: String,
    entries: Vec<MenuEntry>,
    selected: usize,
    animations: Arc<AnimationLibrary>,
    config: GameConfig,
}

impl MenuScene {
    /// Create a menu
    pub fn new(
        title: impl Into<String>,
        entries: Vec<MenuEntry>,
        animations: Arc<AnimationLibrary>,
        config: GameConfig,
    ) -> Self {
        MenuScene {
            title: title.into(),
            entries,
            selected: 0,
            animations,
            config,
        }
    }

    /// Title text
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All entries
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Index of the highlighted entry
    pub fn selected(&self) -> usize {
        self.selected
    }

    fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.entries.len() - 1);
    }

    fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    fn start_selected(&self) -> SimResult<SceneCommand> {
        let Some(entry) = self.entries.get(self.selected) else {
            return Ok(SceneCommand::None);
        };
        info!("Starting `{}` from {:?}", entry.label, entry.level_path);
        let level = LevelDescription::load(&entry.level_path)?;
        let play = PlayScene::new(level, Arc::clone(&self.animations), &self.config)?;
        Ok(SceneCommand::Push(Box::new(play)))
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &str {
        "menu"
    }

    fn handle_action(&mut self, event: ActionEvent) -> SimResult<SceneCommand> {
        if !event.pressed {
            return Ok(SceneCommand::None);
        }
        match event.action {
            Action::Up => self.select_previous(),
            Action::Down => self.select_next(),
            Action::Confirm | Action::Right => return self.start_selected(),
            Action::Back => return Ok(SceneCommand::Quit),
            _ => {}
        }
        Ok(SceneCommand::None)
    }

    fn update(&mut self) -> SimResult<SceneCommand> {
        Ok(SceneCommand::None)
    }
}
