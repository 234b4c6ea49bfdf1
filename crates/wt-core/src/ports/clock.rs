/// Wall clock used to stamp clipboard records.
///
/// Milliseconds since the Unix epoch. The history store keeps whole seconds,
/// so sub-second precision does not survive a reload.
pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> i64;
}
