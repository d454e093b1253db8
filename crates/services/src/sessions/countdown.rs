/// Clock reading for an in-progress session, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub elapsed_secs: u64,
    pub remaining_secs: u64,
    pub expired: bool,
}

impl Countdown {
    pub(crate) fn new(time_limit_secs: u32, elapsed_secs: u64) -> Self {
        let remaining_secs = u64::from(time_limit_secs).saturating_sub(elapsed_secs);
        Self {
            elapsed_secs,
            remaining_secs,
            expired: remaining_secs == 0,
        }
    }
}
