use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "keytrainer";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("keytrainer_config.json"))
    }

    pub fn log_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|proj_dirs| proj_dirs.data_local_dir().join("keytrainer.log"))
            .unwrap_or_else(|| PathBuf::from("keytrainer.log"))
    }
}
