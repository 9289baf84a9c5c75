/// Running counters handed to progress observers.
///
/// A copy is passed out on every notification, so observers never see the
/// aggregator's own state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub processed: u64,
    pub skipped: u64,
}

impl ProcessingStats {
    /// Records offered so far, whether aggregated or skipped.
    pub fn seen(&self) -> u64 {
        self.processed + self.skipped
    }
}
