/// One row of a leaderboard snapshot: a user and their metric value.
///
/// The snapshot is a full, point-in-time ordered read of the tracked metric;
/// the query that produced it determines the order (typically descending by
/// the metric), and ties keep that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub user_id: u64,
    pub value: i64,
}

impl LeaderboardRow {
    pub fn new(user_id: u64, value: i64) -> Self {
        Self { user_id, value }
    }
}

/// 1-based rank and metric value of `user_id` within an ordered snapshot,
/// or `None` when the user is absent.
///
/// Rank is purely positional; nothing is stored, so calling this repeatedly
/// on the same snapshot always yields the same answer.
pub fn rank_of(user_id: u64, snapshot: &[LeaderboardRow]) -> Option<(usize, i64)> {
    snapshot
        .iter()
        .position(|row| row.user_id == user_id)
        .map(|index| (index + 1, snapshot[index].value))
}

#[cfg(test)]
mod tests {
    use super::{LeaderboardRow, rank_of};

    fn snapshot() -> Vec<LeaderboardRow> {
        vec![
            LeaderboardRow::new(11, 900),
            LeaderboardRow::new(22, 450),
            LeaderboardRow::new(33, 450),
            LeaderboardRow::new(44, 100),
        ]
    }

    #[test]
    fn ranks_are_one_based_positions() {
        let rows = snapshot();
        assert_eq!(rank_of(11, &rows), Some((1, 900)));
        assert_eq!(rank_of(44, &rows), Some((4, 100)));
    }

    #[test]
    fn ties_keep_snapshot_order() {
        let rows = snapshot();
        assert_eq!(rank_of(22, &rows), Some((2, 450)));
        assert_eq!(rank_of(33, &rows), Some((3, 450)));
    }

    #[test]
    fn absent_user_is_unranked() {
        assert_eq!(rank_of(99, &snapshot()), None);
        assert_eq!(rank_of(99, &[]), None);
    }

    #[test]
    fn ranking_is_idempotent() {
        let rows = snapshot();
        assert_eq!(rank_of(22, &rows), rank_of(22, &rows));
    }
}
