//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [screen]
//! width = 160
//! height = 120
//!
//! [window]
//! scale = 4
//! target_fps = 30
//! title = Rolling Animation Sample
//!
//! [tumble]
//! angle_per_frame = 15
//! reset_x = 40
//! reset_y = 20
//! selection = random
//! seed = 1234
//!
//! [assets]
//! sprite_sheet = assets/botejin.png
//! catalog = assets/catalog.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::info;
use std::path::PathBuf;

use crate::error::{Result, TumbleError};
use crate::resources::tumble::{SelectionMode, TumbleSettings};

/// Default safe values for startup
const DEFAULT_SCREEN_WIDTH: u32 = 160;
const DEFAULT_SCREEN_HEIGHT: u32 = 120;
const DEFAULT_WINDOW_SCALE: u32 = 4;
const DEFAULT_TARGET_FPS: u32 = 30;
const DEFAULT_TITLE: &str = "Rolling Animation Sample";
const DEFAULT_ANGLE_PER_FRAME: u32 = 15;
/// Where a freshly reset sprite's bottom-right corner sits, relative to the
/// screen centre.
const DEFAULT_RESET_OFFSET: (i32, i32) = (-40, -40);
const DEFAULT_SPRITE_SHEET: &str = "assets/botejin.png";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Largest per-frame step; one frame never turns more than a full quarter.
const MAX_ANGLE_PER_FRAME: u32 = 90;
/// Largest window scale factor.
const MAX_WINDOW_SCALE: u32 = 16;

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Logical screen width in pixels.
    pub screen_width: u32,
    /// Logical screen height in pixels.
    pub screen_height: u32,
    /// Integer factor from screen pixels to window pixels.
    pub window_scale: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Window title.
    pub title: String,
    /// Degrees turned per frame while rotating.
    pub angle_per_frame: u32,
    /// Screen x of the pivot after a reset.
    pub reset_x: i32,
    /// Screen y of the pivot after a reset.
    pub reset_y: i32,
    /// How a new sprite is chosen on reset.
    pub selection: SelectionMode,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Sprite sheet image.
    pub sprite_sheet: PathBuf,
    /// Catalog JSON. `None` uses the built-in catalog.
    pub catalog: Option<PathBuf>,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            window_scale: DEFAULT_WINDOW_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            title: DEFAULT_TITLE.to_string(),
            angle_per_frame: DEFAULT_ANGLE_PER_FRAME,
            reset_x: DEFAULT_SCREEN_WIDTH as i32 / 2 + DEFAULT_RESET_OFFSET.0,
            reset_y: DEFAULT_SCREEN_HEIGHT as i32 / 2 + DEFAULT_RESET_OFFSET.1,
            selection: SelectionMode::default(),
            seed: None,
            sprite_sheet: PathBuf::from(DEFAULT_SPRITE_SHEET),
            catalog: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    pub fn load_from_file(&mut self) -> Result<()> {
        let mut ini = Ini::new();
        ini.load(&self.config_path)
            .map_err(|e| TumbleError::ConfigFile(format!("failed to load {:?}: {e}", self.config_path)))?;
        self.apply(&ini)?;

        info!(
            "Loaded config: {}x{} screen, scale={}, fps={}, {} deg/frame, reset=({}, {}), selection={}",
            self.screen_width,
            self.screen_height,
            self.window_scale,
            self.target_fps,
            self.angle_per_frame,
            self.reset_x,
            self.reset_y,
            self.selection
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<()> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(TumbleError::ConfigFile)?;
        self.apply(&ini)
    }

    fn apply(&mut self, ini: &Ini) -> Result<()> {
        // [screen] section
        if let Some(width) = get_u32(ini, "screen", "width", "screen.width")? {
            self.screen_width = width;
        }
        if let Some(height) = get_u32(ini, "screen", "height", "screen.height")? {
            self.screen_height = height;
        }

        // [window] section
        if let Some(scale) = get_u32(ini, "window", "scale", "window.scale")? {
            self.window_scale = scale;
        }
        if let Some(fps) = get_u32(ini, "window", "target_fps", "window.target_fps")? {
            self.target_fps = fps;
        }
        if let Some(title) = ini.get("window", "title") {
            self.title = title;
        }

        // [tumble] section
        if let Some(step) = get_u32(ini, "tumble", "angle_per_frame", "tumble.angle_per_frame")? {
            self.angle_per_frame = step;
        }
        if let Some(x) = get_i32(ini, "tumble", "reset_x", "tumble.reset_x")? {
            self.reset_x = x;
        }
        if let Some(y) = get_i32(ini, "tumble", "reset_y", "tumble.reset_y")? {
            self.reset_y = y;
        }
        if let Some(selection) = ini.get("tumble", "selection") {
            self.selection = selection.parse()?;
        }
        if let Some(seed) = ini
            .getuint("tumble", "seed")
            .map_err(|reason| invalid("tumble.seed", reason))?
        {
            self.seed = Some(seed);
        }

        // [assets] section
        if let Some(sheet) = ini.get("assets", "sprite_sheet") {
            self.sprite_sheet = PathBuf::from(sheet);
        }
        if let Some(catalog) = ini.get("assets", "catalog") {
            self.catalog = Some(PathBuf::from(catalog));
        }

        self.validate()
    }

    /// Reject values the animation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let nonzero = [
            ("screen.width", self.screen_width),
            ("screen.height", self.screen_height),
            ("window.scale", self.window_scale),
            ("window.target_fps", self.target_fps),
            ("tumble.angle_per_frame", self.angle_per_frame),
        ];
        if let Some(&(key, _)) = nonzero.iter().find(|(_, v)| *v == 0) {
            return Err(invalid(key, "must be greater than zero"));
        }
        if self.window_scale > MAX_WINDOW_SCALE {
            return Err(invalid(
                "window.scale",
                format!("must be at most {MAX_WINDOW_SCALE}"),
            ));
        }
        if self.angle_per_frame > MAX_ANGLE_PER_FRAME {
            return Err(invalid(
                "tumble.angle_per_frame",
                format!("must be at most {MAX_ANGLE_PER_FRAME}"),
            ));
        }
        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<()> {
        let mut ini = Ini::new();

        // [screen] section
        ini.set("screen", "width", Some(self.screen_width.to_string()));
        ini.set("screen", "height", Some(self.screen_height.to_string()));

        // [window] section
        ini.set("window", "scale", Some(self.window_scale.to_string()));
        ini.set("window", "target_fps", Some(self.target_fps.to_string()));
        ini.set("window", "title", Some(self.title.clone()));

        // [tumble] section
        ini.set("tumble", "angle_per_frame", Some(self.angle_per_frame.to_string()));
        ini.set("tumble", "reset_x", Some(self.reset_x.to_string()));
        ini.set("tumble", "reset_y", Some(self.reset_y.to_string()));
        ini.set("tumble", "selection", Some(self.selection.to_string()));
        if let Some(seed) = self.seed {
            ini.set("tumble", "seed", Some(seed.to_string()));
        }

        // [assets] section
        ini.set(
            "assets",
            "sprite_sheet",
            Some(self.sprite_sheet.display().to_string()),
        );
        if let Some(catalog) = &self.catalog {
            ini.set("assets", "catalog", Some(catalog.display().to_string()));
        }

        ini.write(&self.config_path)
            .map_err(|e| TumbleError::ConfigFile(format!("failed to save {:?}: {e}", self.config_path)))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Window size in pixels, clamped to what the window system accepts.
    pub fn window_size(&self) -> (u32, u32) {
        let limit = i32::MAX as u32;
        (
            self.screen_width.saturating_mul(self.window_scale).min(limit),
            self.screen_height.saturating_mul(self.window_scale).min(limit),
        )
    }

    /// Settings for the [`TumbleController`](crate::resources::tumble::TumbleController).
    pub fn tumble_settings(&self) -> TumbleSettings {
        TumbleSettings {
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            angle_per_frame: self.angle_per_frame,
            reset_pivot: Vec2::new(self.reset_x as f32, self.reset_y as f32),
            selection: self.selection,
        }
    }
}

fn invalid(key: &'static str, reason: impl Into<String>) -> TumbleError {
    TumbleError::InvalidConfig {
        key,
        reason: reason.into(),
    }
}

fn get_u32(ini: &Ini, section: &str, name: &str, key: &'static str) -> Result<Option<u32>> {
    ini.getuint(section, name)
        .map_err(|reason| invalid(key, reason))?
        .map(|v| u32::try_from(v).map_err(|e| invalid(key, e.to_string())))
        .transpose()
}

fn get_i32(ini: &Ini, section: &str, name: &str, key: &'static str) -> Result<Option<i32>> {
    ini.getint(section, name)
        .map_err(|reason| invalid(key, reason))?
        .map(|v| i32::try_from(v).map_err(|e| invalid(key, e.to_string())))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_animation() {
        let config = GameConfig::new();
        assert_eq!((config.screen_width, config.screen_height), (160, 120));
        assert_eq!(config.angle_per_frame, 15);
        assert_eq!((config.reset_x, config.reset_y), (40, 20));
        assert_eq!(config.selection, SelectionMode::Random);
        assert_eq!(config.window_size(), (640, 480));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_overrides_present_values_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[screen]\nwidth = 320\n\n[tumble]\nangle_per_frame = 30\nselection = sequential\nseed = 7\n\n[assets]\ncatalog = cat.json\n",
            )
            .unwrap();
        assert_eq!(config.screen_width, 320);
        assert_eq!(config.screen_height, 120);
        assert_eq!(config.angle_per_frame, 30);
        assert_eq!(config.selection, SelectionMode::Sequential);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.catalog, Some(PathBuf::from("cat.json")));
        assert_eq!(config.sprite_sheet, PathBuf::from(DEFAULT_SPRITE_SHEET));
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[tumble]\nangle_per_frame = 0\n")
            .unwrap_err();
        assert!(matches!(
            err,
            TumbleError::InvalidConfig {
                key: "tumble.angle_per_frame",
                ..
            }
        ));
    }

    #[test]
    fn oversized_step_is_rejected() {
        let mut config = GameConfig::new();
        config.angle_per_frame = 120;
        assert!(config.validate().is_err());
    }

    #[test]
    fn huge_window_scale_is_rejected() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[window]\nscale = 4000000000\n")
            .unwrap_err();
        assert!(matches!(
            err,
            TumbleError::InvalidConfig {
                key: "window.scale",
                ..
            }
        ));
    }

    #[test]
    fn window_size_saturates() {
        let config = GameConfig {
            screen_width: u32::MAX,
            window_scale: u32::MAX,
            ..GameConfig::new()
        };
        assert_eq!(config.window_size(), (i32::MAX as u32, i32::MAX as u32));
    }

    #[test]
    fn malformed_numbers_are_reported() {
        let mut config = GameConfig::new();
        let err = config
            .load_from_str("[screen]\nwidth = wide\n")
            .unwrap_err();
        assert!(matches!(
            err,
            TumbleError::InvalidConfig {
                key: "screen.width",
                ..
            }
        ));
    }

    #[test]
    fn unknown_selection_is_rejected() {
        let mut config = GameConfig::new();
        assert!(config.load_from_str("[tumble]\nselection = shuffle\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut config = GameConfig::with_path("/definitely/not/here/config.ini");
        assert!(matches!(
            config.load_from_file(),
            Err(TumbleError::ConfigFile(_))
        ));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let path = std::env::temp_dir().join(format!(
            "tumbleblock-config-{}.ini",
            std::process::id()
        ));
        let mut saved = GameConfig::with_path(&path);
        saved.screen_width = 200;
        saved.reset_y = -5;
        saved.selection = SelectionMode::Sequential;
        saved.seed = Some(99);
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, saved);
    }

    #[test]
    fn tumble_settings_carry_reset_pivot() {
        let settings = GameConfig::new().tumble_settings();
        assert_eq!(settings.reset_pivot, Vec2::new(40.0, 20.0));
        assert_eq!(settings.angle_per_frame, 15);
    }
}
