mod level_results;
mod main_config;
mod snake_config;

pub(crate) use grid_snake_common::config::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

pub use level_results::LevelResults;
pub use main_config::{get_config_manager, Config};
pub use snake_config::SnakeConfig;
