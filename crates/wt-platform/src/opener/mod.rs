//! Opens files with the OS default application.
//!
//! One launcher per target OS, chosen at compile time.

use std::path::Path;
use std::process::Command;

use tracing::info;
use wt_core::ports::{FileOpenerPort, OpenerError};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileOpener;

impl SystemFileOpener {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
fn launcher(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    // empty title argument so a quoted path is not taken as the window title
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn launcher(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn launcher(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

impl FileOpenerPort for SystemFileOpener {
    fn open(&self, path: &Path) -> Result<(), OpenerError> {
        let mut cmd = launcher(path);
        info!(path = %path.display(), program = ?cmd.get_program(), "opening file with default application");

        let status = cmd.status().map_err(|source| OpenerError::Launch {
            path: path.to_path_buf(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(OpenerError::Failed {
                path: path.to_path_buf(),
                status: status.to_string(),
            })
        }
    }
}
