//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for a safe startup and methods to load/save configuration. Missing keys
//! keep their current values; an invalid color or a non-positive damage or
//! health value keeps the default with a warning.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1000
//! height = 600
//! target_fps = 60
//! vsync = true
//! fullscreen = false
//!
//! [physics]
//! gravity = 0.8
//! jump_force = -15
//! move_speed = 5
//! punch_damage = 5
//! kick_damage = 8
//! max_health = 100
//!
//! [player1]
//! name = Player 1
//! color = ef4444
//! face = faces/p1.png
//!
//! [player2]
//! name = Player 2
//! color = 3b82f6
//!
//! [bag]
//! name = Trainee
//! color = ea580c
//!
//! [audio]
//! muted = false
//! sounds_dir = ./assets/sounds
//!
//! [commentary]
//! command = faceoff-announcer --fast
//! timeout_secs = 10
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::fighterconfig::FighterConfig;
use crate::components::tint::Tint;
use crate::resources::audio::AudioSettings;
use crate::resources::gamesettings::{ARENA_HEIGHT, ARENA_WIDTH, GameSettings};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = ARENA_WIDTH as u32;
const DEFAULT_WINDOW_HEIGHT: u32 = ARENA_HEIGHT as u32;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_FULLSCREEN: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
const DEFAULT_COMMENTARY_TIMEOUT_SECS: u64 = 10;

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second. One simulation tick per frame.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    pub settings: GameSettings,
    pub player1: FighterConfig,
    pub player2: FighterConfig,
    pub bag: FighterConfig,
    pub audio: AudioSettings,
    /// External text service client. Empty disables commentary requests.
    pub commentary_command: String,
    /// Seconds the commentary command may run before it is killed.
    pub commentary_timeout_secs: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A strictly positive integer that fits in `i32`. Anything else is logged
/// and skipped so the current value stays.
fn positive_int(config: &Ini, section: &str, key: &str) -> Option<i32> {
    let raw = config.getint(section, key).ok().flatten()?;
    match i32::try_from(raw) {
        Ok(v) if v > 0 => Some(v),
        _ => {
            warn!("[{}] {} must be a positive integer, got {}", section, key, raw);
            None
        }
    }
}

fn load_fighter(config: &Ini, section: &str, fighter: &mut FighterConfig) {
    if let Some(name) = config.get(section, "name") {
        let name = name.trim();
        if name.is_empty() {
            warn!("[{}] name is empty, keeping '{}'", section, fighter.name);
        } else {
            fighter.name = name.to_string();
        }
    }
    if let Some(token) = config.get(section, "color") {
        match Tint::from_hex(&token) {
            Some(color) => fighter.color = color,
            None => warn!(
                "[{}] invalid color '{}', keeping {}",
                section,
                token,
                fighter.color.to_hex()
            ),
        }
    }
    if let Some(face) = config.get(section, "face") {
        let face = face.trim();
        fighter.face = (!face.is_empty()).then(|| PathBuf::from(face));
    }
}

fn save_fighter(config: &mut Ini, section: &str, fighter: &FighterConfig) {
    config.set(section, "name", Some(fighter.name.clone()));
    // '#' starts a comment in INI files
    let color = fighter.color.to_hex().trim_start_matches('#').to_string();
    config.set(section, "color", Some(color));
    let face = fighter
        .face
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    config.set(section, "face", Some(face));
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            fullscreen: DEFAULT_FULLSCREEN,
            settings: GameSettings::default(),
            player1: FighterConfig::player_one(),
            player2: FighterConfig::player_two(),
            bag: FighterConfig::bag(),
            audio: AudioSettings::default(),
            commentary_command: String::new(),
            commentary_timeout_secs: DEFAULT_COMMENTARY_TIMEOUT_SECS,
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
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }
        if let Some(fullscreen) = config.getbool("window", "fullscreen").ok().flatten() {
            self.fullscreen = fullscreen;
        }

        // [physics] section
        let s = &mut self.settings;
        if let Some(v) = config.getfloat("physics", "gravity").ok().flatten() {
            s.gravity = v as f32;
        }
        if let Some(v) = config.getfloat("physics", "jump_force").ok().flatten() {
            s.jump_force = v as f32;
        }
        if let Some(v) = config.getfloat("physics", "move_speed").ok().flatten() {
            s.move_speed = v as f32;
        }
        if let Some(v) = positive_int(&config, "physics", "punch_damage") {
            s.punch_damage = v;
        }
        if let Some(v) = positive_int(&config, "physics", "kick_damage") {
            s.kick_damage = v;
        }
        if let Some(v) = positive_int(&config, "physics", "max_health") {
            s.max_health = v;
        }

        load_fighter(&config, "player1", &mut self.player1);
        load_fighter(&config, "player2", &mut self.player2);
        load_fighter(&config, "bag", &mut self.bag);

        // [audio] section
        if let Some(muted) = config.getbool("audio", "muted").ok().flatten() {
            self.audio.muted = muted;
        }
        if let Some(dir) = config.get("audio", "sounds_dir") {
            self.audio.sounds_dir = PathBuf::from(dir.trim());
        }

        // [commentary] section
        if let Some(command) = config.get("commentary", "command") {
            self.commentary_command = command.trim().to_string();
        }
        if let Some(secs) = config.getuint("commentary", "timeout_secs").ok().flatten() {
            if secs > 0 {
                self.commentary_timeout_secs = secs;
            } else {
                warn!("[commentary] timeout_secs must be positive, got {}", secs);
            }
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, fullscreen={}, fighters '{}' / '{}', bag '{}'",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.fullscreen,
            self.player1.name,
            self.player2.name,
            self.bag.name
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));
        config.set("window", "fullscreen", Some(self.fullscreen.to_string()));

        // [physics] section
        let s = &self.settings;
        config.set("physics", "gravity", Some(s.gravity.to_string()));
        config.set("physics", "jump_force", Some(s.jump_force.to_string()));
        config.set("physics", "move_speed", Some(s.move_speed.to_string()));
        config.set("physics", "punch_damage", Some(s.punch_damage.to_string()));
        config.set("physics", "kick_damage", Some(s.kick_damage.to_string()));
        config.set("physics", "max_health", Some(s.max_health.to_string()));

        save_fighter(&mut config, "player1", &self.player1);
        save_fighter(&mut config, "player2", &self.player2);
        save_fighter(&mut config, "bag", &self.bag);

        // [audio] section
        config.set("audio", "muted", Some(self.audio.muted.to_string()));
        config.set(
            "audio",
            "sounds_dir",
            Some(self.audio.sounds_dir.to_string_lossy().into_owned()),
        );

        // [commentary] section
        config.set("commentary", "command", Some(self.commentary_command.clone()));
        config.set(
            "commentary",
            "timeout_secs",
            Some(self.commentary_timeout_secs.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("faceoff-{}-{}.ini", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1000, 600));
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.settings, GameSettings::default());
        assert_eq!(config.player1.name, "Player 1");
        assert_eq!(config.bag.color.to_hex(), "#ea580c");
        assert!(config.commentary_command.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path(temp_path("missing-never-written"));
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path(temp_path("missing-never-written")));
    }

    #[test]
    fn test_save_then_load_keeps_values() {
        let path = temp_path("save-load");
        let mut saved = GameConfig::with_path(&path);
        saved.target_fps = 30;
        saved.settings.kick_damage = 11;
        saved.player2 = FighterConfig::new("Drago", Tint::new(1, 2, 3, 255)).with_face("drago.png");
        saved.audio.muted = true;
        saved.commentary_command = "announcer --fast".to_string();
        saved.commentary_timeout_secs = 3;
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.target_fps, 30);
        assert_eq!(loaded.settings.kick_damage, 11);
        assert_eq!(loaded.player2.name, "Drago");
        assert_eq!(loaded.player2.color, Tint::new(1, 2, 3, 255));
        assert_eq!(loaded.player2.face, Some(PathBuf::from("drago.png")));
        assert_eq!(loaded.player1.face, None);
        assert!(loaded.audio.muted);
        assert_eq!(loaded.commentary_command, "announcer --fast");
        assert_eq!(loaded.commentary_timeout_secs, 3);
    }

    #[test]
    fn test_partial_file_keeps_defaults_and_rejects_bad_color() {
        let path = temp_path("partial");
        std::fs::write(
            &path,
            "[player1]\nname = Rocky\ncolor = not-a-color\n\n[physics]\ngravity = 1.5\n",
        )
        .unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.player1.name, "Rocky");
        assert_eq!(config.player1.color, FighterConfig::player_one().color);
        assert_eq!(config.settings.gravity, 1.5);
        assert_eq!(config.settings.move_speed, GameSettings::default().move_speed);
        assert_eq!(config.player2, FighterConfig::player_two());
    }

    #[test]
    fn test_non_positive_or_oversized_damage_keeps_defaults() {
        let path = temp_path("bad-damage");
        std::fs::write(
            &path,
            "[physics]\npunch_damage = -5\nkick_damage = 4294967304\nmax_health = 0\n",
        )
        .unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        let defaults = GameSettings::default();
        assert_eq!(config.settings.punch_damage, defaults.punch_damage);
        assert_eq!(config.settings.kick_damage, defaults.kick_damage);
        assert_eq!(config.settings.max_health, defaults.max_health);
    }

    #[test]
    fn test_valid_damage_is_loaded() {
        let path = temp_path("good-damage");
        std::fs::write(&path, "[physics]\npunch_damage = 7\nkick_damage = 12\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.settings.punch_damage, 7);
        assert_eq!(config.settings.kick_damage, 12);
    }

    #[test]
    fn test_non_ascii_color_keeps_default() {
        let path = temp_path("non-ascii-color");
        std::fs::write(&path, "[player1]\ncolor = aééb\n").unwrap();

        let mut config = GameConfig::with_path(&path);
        config.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.player1.color, FighterConfig::player_one().color);
    }
}
