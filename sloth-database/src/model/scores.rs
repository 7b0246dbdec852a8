use serde::{Deserialize, Serialize};

/// Reputation state for one member.
#[derive(Clone, Copy, Debug)]
pub struct MemberScore {
    pub user_id: u64,
    pub xp: i64,
    pub level: i64,
    pub last_xp_at: u64,
    pub score_points: i64,
    pub last_rep_at: u64,
}

/// One `(user, value)` row of an ordered metric snapshot.
///
/// Serializable because full snapshots are cached briefly between
/// leaderboard invocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub user_id: u64,
    pub value: i64,
}
