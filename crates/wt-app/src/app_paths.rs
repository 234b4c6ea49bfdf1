use std::path::PathBuf;

use wt_core::app_dirs::AppDirs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub history_path: PathBuf,
    pub settings_path: PathBuf,
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl AppPaths {
    pub fn from_app_dirs(dirs: &AppDirs) -> Self {
        Self {
            data_dir: dirs.app_data_root.clone(),
            history_path: dirs.history_file(),
            settings_path: dirs.settings_file(),
            config_path: dirs.config_file(),
            logs_dir: dirs.logs_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_paths_derives_concrete_locations_from_app_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/wetools"),
        };

        let paths = AppPaths::from_app_dirs(&dirs);

        assert_eq!(paths.data_dir, PathBuf::from("/tmp/wetools"));
        assert_eq!(paths.history_path, PathBuf::from("/tmp/wetools/clipboard.txt"));
        assert_eq!(paths.settings_path, PathBuf::from("/tmp/wetools/settings.json"));
        assert_eq!(paths.config_path, PathBuf::from("/tmp/wetools/config.toml"));
        assert_eq!(paths.logs_dir, PathBuf::from("/tmp/wetools/logs"));
    }
}
