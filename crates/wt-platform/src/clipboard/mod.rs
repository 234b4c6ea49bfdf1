mod clipboard_rs_adapter;

pub use clipboard_rs_adapter::ClipboardRsClipboard;
