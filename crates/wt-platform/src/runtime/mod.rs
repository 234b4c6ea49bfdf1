mod poller;

pub use poller::{ClipboardPoller, PollOutcome, DEFAULT_POLL_INTERVAL, MAX_CONSECUTIVE_FAILURES};
