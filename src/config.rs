// Configuration module for reading Snake.toml
//
// The core engine only consumes the board dimensions and the optional
// random seed; the remaining sections configure the surrounding shell
// (arbiter constants, run limits, debug logging).

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub board: BoardConfig,
    pub strategy: StrategyConfig,
    pub loop_detection: LoopDetectionConfig,
    pub run: RunConfig,
    pub debug: DebugConfig,
}

/// Board dimensions and food-placement seed
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    /// Fixed seed for reproducible food placement; omit to seed from the OS
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Arbiter constants for the hopelessness look-ahead
#[derive(Debug, Deserialize, Clone)]
pub struct StrategyConfig {
    /// Horizon = max(snake length * factor, min steps)
    pub hopeless_horizon_length_factor: usize,
    pub hopeless_horizon_min_steps: usize,
}

/// Tail-chase loop detection constants
#[derive(Debug, Deserialize, Clone)]
pub struct LoopDetectionConfig {
    pub max_loops: u32,
}

/// Headless runner limits
#[derive(Debug, Deserialize, Clone)]
pub struct RunConfig {
    /// Hard tick cap for a single run; 0 means unlimited
    pub max_ticks: u64,
}

/// Debug configuration
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
            board: BoardConfig {
                width: 10,
                height: 10,
                seed: None,
            },
            strategy: StrategyConfig {
                hopeless_horizon_length_factor: 2,
                hopeless_horizon_min_steps: 20,
            },
            loop_detection: LoopDetectionConfig { max_loops: 2 },
            run: RunConfig { max_ticks: 100_000 },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "ai_snake_debug.jsonl".to_string(),
            },
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.board.width, 10);
        assert_eq!(config.board.height, 10);
        assert_eq!(config.loop_detection.max_loops, 2);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        // This test ensures Snake.toml is valid and can be parsed
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_snake_toml_contains_all_required_fields() {
        let config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");

        assert!(config.board.width > 0);
        assert!(config.board.height > 0);
        assert!(config.strategy.hopeless_horizon_length_factor > 0);
        assert!(config.strategy.hopeless_horizon_min_steps > 0);
        assert!(config.loop_detection.max_loops > 0);
        assert!(!config.debug.log_file_path.is_empty());
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        let hardcoded_config = Config::default_hardcoded();

        assert_eq!(file_config.board.width, hardcoded_config.board.width);
        assert_eq!(file_config.board.height, hardcoded_config.board.height);
        assert_eq!(file_config.board.seed, hardcoded_config.board.seed);
        assert_eq!(
            file_config.strategy.hopeless_horizon_length_factor,
            hardcoded_config.strategy.hopeless_horizon_length_factor
        );
        assert_eq!(
            file_config.strategy.hopeless_horizon_min_steps,
            hardcoded_config.strategy.hopeless_horizon_min_steps
        );
        assert_eq!(
            file_config.loop_detection.max_loops,
            hardcoded_config.loop_detection.max_loops
        );
        assert_eq!(file_config.run.max_ticks, hardcoded_config.run.max_ticks);
        assert_eq!(file_config.debug.enabled, hardcoded_config.debug.enabled);
        assert_eq!(
            file_config.debug.log_file_path,
            hardcoded_config.debug.log_file_path
        );
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.loop_detection.max_loops, 2);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        // Test with a non-existent file
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
