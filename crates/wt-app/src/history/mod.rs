mod engine;

pub use engine::ClipboardHistoryEngine;
