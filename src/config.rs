// Configuration module for reading Snake.toml
// Heuristic constants live here rather than in the code: the food-goal
// threshold and axis priority are tuning knobs, not invariants.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::{Direction, GameSettings};

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub goal: GoalConfig,
    pub decision: DecisionConfig,
    pub debug: DebugConfig,
    /// Pass-through overrides sent to the server for training games
    #[serde(default)]
    pub game_settings: GameSettings,
}

/// Food-seeking goal constants
#[derive(Debug, Deserialize, Clone)]
pub struct GoalConfig {
    /// Minimum food tiles on the map before a new goal is chosen.
    /// Below this an existing goal is still pursued.
    pub min_food_for_goal: usize,
    /// Resolve the direction toward the goal on the x axis before y
    pub x_axis_first: bool,
}

/// Decision sequencer constants
#[derive(Debug, Deserialize, Clone)]
pub struct DecisionConfig {
    /// Returned when no survivable direction exists; a move must be
    /// registered every tick regardless
    pub default_direction: Direction,
}

/// Decision log configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            goal: GoalConfig {
                min_food_for_goal: 3,
                x_axis_first: true,
            },
            decision: DecisionConfig {
                default_direction: Direction::Down,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snakepit_debug.jsonl".to_string(),
            },
            game_settings: GameSettings::default(),
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!(
                "Warning: Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
