use grid_snake_common::config::Validate;
use serde::{Deserialize, Serialize};

use super::{ConfigManager, FileContentConfigProvider, LevelResults, SnakeConfig, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "grid_snake_config.yaml";

fn default_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: Option<&str>,
) -> (String, ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>) {
    let path = path.map(str::to_string).unwrap_or_else(default_config_path);
    let manager = ConfigManager::from_yaml_file(&path);
    (path, manager)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub snake: SnakeConfig,
    #[serde(default)]
    pub level_results: LevelResults,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        self.level_results.validate()?;
        Ok(())
    }
}
