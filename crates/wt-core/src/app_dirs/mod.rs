//! Where WeTools keeps its files.
//!
//! Everything lives under one data root so a profile (`WT_PROFILE`) or a test
//! can relocate the whole tree at once.

use std::path::PathBuf;

/// Clipboard history, one record per line.
pub const HISTORY_FILE: &str = "clipboard.txt";
pub const SETTINGS_FILE: &str = "settings.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOGS_DIR: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn history_file(&self) -> PathBuf {
        self.app_data_root.join(HISTORY_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.app_data_root.join(SETTINGS_FILE)
    }

    pub fn config_file(&self) -> PathBuf {
        self.app_data_root.join(CONFIG_FILE)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join(LOGS_DIR)
    }
}
