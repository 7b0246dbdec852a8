/// All-time activity totals derived from the action log plus the live
/// exchangeable counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActivityTotals {
    pub exchanged_messages: i64,
    pub exchanged_voice_seconds: i64,
}
