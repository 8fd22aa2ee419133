use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use snake_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_common::snake::SnakeSettings;

const CONFIG_FILE_NAME: &str = "snake_runner_config.yaml";

fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub type RunnerConfigManager = ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>;

pub fn get_config_manager(path: Option<PathBuf>) -> (RunnerConfigManager, PathBuf) {
    let path = path.unwrap_or_else(default_config_path);
    (ConfigManager::from_yaml_file(path.clone()), path)
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub snake: SnakeSettings,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()
    }
}
