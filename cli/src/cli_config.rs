use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use tictactoe_engine::games::tictactoe::PlayStyle;

const CONFIG_FILE_NAME: &str = "tictactoe_cli_config.yaml";
const MAX_BOT_DELAY_MS: u64 = 5_000;

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub type CliConfigManager = ConfigManager<FileContentConfigProvider, CliConfig, YamlConfigSerializer>;

pub fn get_config_manager() -> CliConfigManager {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Human against the engine.
    #[default]
    Singleplayer,
    /// Two humans taking turns at one terminal.
    Multiplayer,
    /// The engine plays both sides.
    Watch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MarkChoice {
    #[default]
    X,
    O,
    Random,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct CliConfig {
    pub mode: GameMode,
    pub mark: MarkChoice,
    pub play_style: PlayStyle,
    pub bot_delay_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub use_log_prefix: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "Bot delay ({} ms) cannot exceed {} ms",
                self.bot_delay_ms, MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Singleplayer,
            mark: MarkChoice::X,
            play_style: PlayStyle::TrueOptimal,
            bot_delay_ms: 300,
            seed: None,
            use_log_prefix: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::config::{ConfigSerializer, YamlConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or_default();
        path.push(format!("temp_tictactoe_cli_config_{}_{}.yaml", std::process::id(), nanos));
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CliConfig::default().validate().is_ok());
    }

    #[test]
    fn test_long_bot_delay_is_invalid() {
        let config = CliConfig {
            bot_delay_ms: MAX_BOT_DELAY_MS + 1,
            ..CliConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_yaml_uses_snake_case_names() {
        let config = CliConfig {
            mode: GameMode::Watch,
            mark: MarkChoice::Random,
            play_style: PlayStyle::LegacyGreedy,
            ..CliConfig::default()
        };

        let yaml = YamlConfigSerializer::new().serialize(&config).unwrap();

        assert!(yaml.contains("mode: watch"));
        assert!(yaml.contains("mark: random"));
        assert!(yaml.contains("play_style: legacy_greedy"));
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let yaml = "mode: multiplayer\nmark: o\nplay_style: true_optimal\nbot_delay_ms: 0\n";

        let config: CliConfig = YamlConfigSerializer::new().deserialize(yaml).unwrap();

        assert_eq!(config.mode, GameMode::Multiplayer);
        assert_eq!(config.mark, MarkChoice::O);
        assert_eq!(config.seed, None);
        assert!(!config.use_log_prefix);
    }

    #[test]
    fn test_config_survives_manager_round_trip() {
        let config = CliConfig {
            seed: Some(7),
            ..CliConfig::default()
        };
        let file_path = get_temp_file_path();

        let manager: CliConfigManager = ConfigManager::from_yaml_file(file_path.clone());
        manager.set_config(&config).unwrap();
        let reloaded: CliConfigManager = ConfigManager::from_yaml_file(file_path.clone());
        let loaded = reloaded.get_config().unwrap();
        let _ = std::fs::remove_file(&file_path);

        assert_eq!(loaded, config);
    }
}
