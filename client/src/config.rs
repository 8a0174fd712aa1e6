use serde::{Deserialize, Serialize};

use common::config::{ConfigManager, Validate};
use common::game::GameSettings;

const CONFIG_FILE_NAME: &str = "snake_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(path_override: Option<&str>) -> ConfigManager<Config> {
    let path = path_override.map_or_else(get_config_path, str::to_string);
    ConfigManager::from_yaml_file(&path)
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    pub base_url: String,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl Validate for LeaderboardConfig {
    fn validate(&self) -> Result<(), String> {
        // The gateway speaks plain HTTP; TLS termination belongs to a proxy.
        if !self.base_url.starts_with("http://") {
            return Err("Leaderboard base URL must start with http://".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.leaderboard.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_https_base_url_rejected() {
        let config = Config {
            leaderboard: LeaderboardConfig {
                base_url: "https://leaderboard.local".to_string(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config =
            serde_yaml_ng::from_str("leaderboard:\n  base_url: http://h:1\n").unwrap();
        assert_eq!(config.game, GameSettings::default());
        assert_eq!(config.leaderboard.base_url, "http://h:1");
    }
}
