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
//! Game configuration
//!
//! Settings loaded from an INI file. Every key is optional; missing keys
//! keep their defaults.
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 768
//!
//! [simulation]
//! frame_ms = 16
//! sword_lifespan_ms = 150
//!
//! [debug]
//! draw_textures = true
//! draw_collision = false
//! follow_camera = false
//! ```

use crate::error::{SimError, SimResult};
use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 768;
const DEFAULT_FRAME_MS: u64 = 16;
const DEFAULT_SWORD_LIFESPAN_MS: u64 = 150;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window (and room) width in pixels
    pub window_width: u32,
    /// Window (and room) height in pixels
    pub window_height: u32,
    /// Simulated milliseconds per frame
    pub frame_ms: u64,
    /// Sword lifespan in milliseconds
    pub sword_lifespan_ms: u64,
    /// Draw sprites
    pub draw_textures: bool,
    /// Draw bounding boxes and AI debug geometry
    pub draw_collision: bool,
    /// Centre the camera on the player instead of snapping to rooms
    pub follow_camera: bool,
    /// Path to the configuration file
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        GameConfig {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            frame_ms: DEFAULT_FRAME_MS,
            sword_lifespan_ms: DEFAULT_SWORD_LIFESPAN_MS,
            draw_textures: true,
            draw_collision: false,
            follow_camera: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a configuration that loads from `path`
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        GameConfig {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from the INI file at `config_path`
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] if the file cannot be read or parsed, or a key
    /// holds a value of the wrong type.
    pub fn load_from_file(&mut self) -> SimResult<()> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to load {:?}: {}", self.config_path, e)))?;
        self.apply(&ini)
    }

    /// Load values from INI text
    pub fn load_from_str(&mut self, text: &str) -> SimResult<()> {
        let mut ini = Ini::new();
        ini.read(text.to_string())
            .map_err(|e| SimError::Config(format!("failed to parse config: {}", e)))?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> SimResult<()> {
        if let Some(width) = get_u32(ini, "window", "width")? {
            self.window_width = width;
        }
        if let Some(height) = get_u32(ini, "window", "height")? {
            self.window_height = height;
        }
        if let Some(frame_ms) = get_uint(ini, "simulation", "frame_ms")? {
            self.frame_ms = frame_ms;
        }
        if let Some(lifespan) = get_uint(ini, "simulation", "sword_lifespan_ms")? {
            self.sword_lifespan_ms = lifespan;
        }
        if let Some(flag) = get_bool(ini, "debug", "draw_textures")? {
            self.draw_textures = flag;
        }
        if let Some(flag) = get_bool(ini, "debug", "draw_collision")? {
            self.draw_collision = flag;
        }
        if let Some(flag) = get_bool(ini, "debug", "follow_camera")? {
            self.follow_camera = flag;
        }

        info!(
            "Loaded config: {}x{} rooms, frame={}ms, sword={}ms",
            self.window_width, self.window_height, self.frame_ms, self.sword_lifespan_ms
        );
        Ok(())
    }

    /// Save the configuration to `config_path`
    pub fn save_to_file(&self) -> SimResult<()> {
        let mut ini = Ini::new();
        ini.set("window", "width", Some(self.window_width.to_string()));
        ini.set("window", "height", Some(self.window_height.to_string()));
        ini.set("simulation", "frame_ms", Some(self.frame_ms.to_string()));
        ini.set(
            "simulation",
            "sword_lifespan_ms",
            Some(self.sword_lifespan_ms.to_string()),
        );
        ini.set("debug", "draw_textures", Some(self.draw_textures.to_string()));
        ini.set("debug", "draw_collision", Some(self.draw_collision.to_string()));
        ini.set("debug", "follow_camera", Some(self.follow_camera.to_string()));

        ini.write(&self.config_path)
            .map_err(|e| SimError::Config(format!("failed to save {:?}: {}", self.config_path, e)))?;
        info!("Saved config to {:?}", self.config_path);
        Ok(())
    }

    /// Path the configuration loads from and saves to
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

fn get_uint(ini: &Ini, section: &str, key: &str) -> SimResult<Option<u64>> {
    ini.getuint(section, key)
        .map_err(|e| SimError::Config(format!("[{}] {}: {}", section, key, e)))
}

fn get_u32(ini: &Ini, section: &str, key: &str) -> SimResult<Option<u32>> {
    get_uint(ini, section, key)?
        .map(|value| {
            u32::try_from(value).map_err(|_| {
                SimError::Config(format!("[{}] {}: {} does not fit in 32 bits", section, key, value))
            })
        })
        .transpose()
}

fn get_bool(ini: &Ini, section: &str, key: &str) -> SimResult<Option<bool>> {
    ini.getbool(section, key)
        .map_err(|e| SimError::Config(format!("[{}] {}: {}", section, key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 768);
        assert_eq!(config.sword_lifespan_ms, 150);
        assert!(config.draw_textures);
    }

    #[test]
    fn test_partial_override() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nwidth = 640\n\n[debug]\nfollow_camera = true\n")
            .unwrap();
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 768);
        assert!(config.follow_camera);
    }

    #[test]
    fn test_bad_value_is_an_error() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[simulation]\nframe_ms = fast\n")
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_oversized_window_is_an_error() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[window]\nwidth = 4294967296\n")
            .unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/definitely/not/here/config.ini");
        assert!(config.load_from_file().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");

        let mut config = GameConfig::with_path(&path);
        config.frame_ms = 20;
        config.draw_collision = true;
        config.save_to_file().unwrap();

        let mut reloaded = GameConfig::with_path(&path);
        reloaded.load_from_file().unwrap();
        assert_eq!(reloaded.frame_ms, 20);
        assert!(reloaded.draw_collision);
    }
}
