//! Line-oriented clipboard history store
//!
//! One record per line, newest first: `YYYY-MM-DD HH:MM:SS|content`, or
//! `YYYY-MM-DD HH:MM:SS~|escaped content` when the content holds a line
//! break or a backslash.

pub mod codec;
mod file_store;

pub use file_store::FileHistoryStore;
