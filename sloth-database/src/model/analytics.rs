/// Running per-day counters for one guild, reset after every snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyticsCounters {
    pub members_joined: u64,
    pub members_left: u64,
    pub messages_sent: u64,
}

/// One appended history row: the day's counters plus the member totals.
#[derive(Clone, Debug)]
pub struct DataBump {
    pub members_joined: u64,
    pub members_left: u64,
    pub messages_sent: u64,
    pub total_members: u64,
    pub online_members: u64,
    pub day_label: String,
    pub bumped_at: u64,
}
