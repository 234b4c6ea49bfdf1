//! # wt-infra
//!
//! Infrastructure implementations of the `wt-core` ports: the flat-file
//! clipboard history store, the JSON settings repository, the system clock
//! and the downloads writer.

pub mod fs;
pub mod history;
pub mod settings;
pub mod time;

pub use fs::downloads::{DownloadsError, DownloadsWriter};
pub use history::FileHistoryStore;
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
