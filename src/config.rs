use log::{info, warn};
use serde::Deserialize;
use std::fs;

use crate::error::{GameError, GameResult};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub enemy: EnemyConfig,
    #[serde(default)]
    pub walls: WallConfig,
    #[serde(default)]
    pub turns: TurnConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub level: LevelConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MotionConfig {
    /// Seconds to slide across one cell
    #[serde(default = "default_move_duration")]
    pub move_duration: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_starting_food")]
    pub starting_food: i32,
    #[serde(default = "default_wall_damage")]
    pub wall_damage: i32,
    #[serde(default = "default_points_per_food")]
    pub points_per_food: i32,
    #[serde(default = "default_points_per_soda")]
    pub points_per_soda: i32,
    #[serde(default = "default_restart_level_delay")]
    pub restart_level_delay: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemyConfig {
    #[serde(default = "default_player_damage")]
    pub player_damage: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WallConfig {
    #[serde(default = "default_wall_hit_points")]
    pub hit_points: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TurnConfig {
    /// Pause between the player's move and the enemies' moves
    #[serde(default = "default_turn_delay")]
    pub turn_delay: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_move_sounds")]
    pub move_sounds: [String; 2],
    #[serde(default = "default_eat_sounds")]
    pub eat_sounds: [String; 2],
    #[serde(default = "default_drink_sounds")]
    pub drink_sounds: [String; 2],
    #[serde(default = "default_chop_sounds")]
    pub chop_sounds: [String; 2],
    #[serde(default = "default_enemy_attack_sounds")]
    pub enemy_attack_sounds: [String; 2],
    #[serde(default = "default_game_over_sound")]
    pub game_over_sound: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    #[serde(default = "default_level_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_turn_log")]
    pub enable_turn_log: bool,
    #[serde(default = "default_turn_log_path")]
    pub turn_log_path: String,
}

// Default values
fn default_move_duration() -> f32 { 0.1 }
fn default_starting_food() -> i32 { 100 }
fn default_wall_damage() -> i32 { 1 }
fn default_points_per_food() -> i32 { 10 }
fn default_points_per_soda() -> i32 { 20 }
fn default_restart_level_delay() -> f32 { 1.0 }
fn default_player_damage() -> i32 { 10 }
fn default_wall_hit_points() -> i32 { 3 }
fn default_turn_delay() -> f32 { 0.1 }
fn default_move_sounds() -> [String; 2] { pair("footstep1", "footstep2") }
fn default_eat_sounds() -> [String; 2] { pair("fruit1", "fruit2") }
fn default_drink_sounds() -> [String; 2] { pair("soda1", "soda2") }
fn default_chop_sounds() -> [String; 2] { pair("chop1", "chop2") }
fn default_enemy_attack_sounds() -> [String; 2] { pair("enemy1", "enemy2") }
fn default_game_over_sound() -> String { "die".to_string() }
fn default_level_path() -> String { "levels/level1.txt".to_string() }
fn default_window_title() -> String { "gridcrawl".to_string() }
fn default_cell_size() -> f32 { 48.0 }
fn default_enable_turn_log() -> bool { true }
fn default_turn_log_path() -> String { "turn_log.json".to_string() }

fn pair(a: &str, b: &str) -> [String; 2] {
    [a.to_string(), b.to_string()]
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_duration: default_move_duration(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            starting_food: default_starting_food(),
            wall_damage: default_wall_damage(),
            points_per_food: default_points_per_food(),
            points_per_soda: default_points_per_soda(),
            restart_level_delay: default_restart_level_delay(),
        }
    }
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            player_damage: default_player_damage(),
        }
    }
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            hit_points: default_wall_hit_points(),
        }
    }
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            turn_delay: default_turn_delay(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            move_sounds: default_move_sounds(),
            eat_sounds: default_eat_sounds(),
            drink_sounds: default_drink_sounds(),
            chop_sounds: default_chop_sounds(),
            enemy_attack_sounds: default_enemy_attack_sounds(),
            game_over_sound: default_game_over_sound(),
        }
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            path: default_level_path(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_turn_log: default_enable_turn_log(),
            turn_log_path: default_turn_log_path(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or use defaults if it is missing or invalid
    pub fn load(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    warn!("failed to parse {}: {}; using default configuration", path, e);
                    Config::default()
                }
            },
            Err(_) => {
                info!("no {} found, using default configuration", path);
                Config::default()
            }
        }
    }

    pub fn from_toml_str(contents: &str) -> GameResult<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall the game
    pub fn validate(&self) -> GameResult<()> {
        let duration = self.motion.move_duration;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(GameError::Setting(format!(
                "motion.move_duration must be a positive number of seconds, got {}",
                duration
            )));
        }
        Ok(())
    }
}
