use crate::app_dirs::AppDirs;
use crate::ports::errors::AppDirsError;

/// Locates the data root for the current user and profile.
///
/// Resolution only computes paths; creating the directory is left to the
/// stores that write into it.
pub trait AppDirsPort: Send + Sync {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError>;
}
