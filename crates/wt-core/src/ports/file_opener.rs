use std::path::Path;

use crate::ports::errors::OpenerError;

/// Hands a file to the OS default handler.
pub trait FileOpenerPort: Send + Sync {
    fn open(&self, path: &Path) -> Result<(), OpenerError>;
}
