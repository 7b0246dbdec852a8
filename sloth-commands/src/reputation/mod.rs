pub mod info;
pub mod leaderboard;
pub mod rep;

use sloth_analytics::LeaderboardRow;
use sloth_database::model::scores::MetricRow;

/// Adapt a stored metric snapshot into the ranking engine's row type.
pub(crate) fn to_leaderboard_rows(rows: &[MetricRow]) -> Vec<LeaderboardRow> {
    rows.iter()
        .map(|row| LeaderboardRow::new(row.user_id, row.value))
        .collect()
}

/// Render a rank result, falling back to the `??` / `0` unranked sentinel.
pub(crate) fn rank_display(rank: Option<(usize, i64)>) -> (String, i64) {
    match rank {
        Some((position, value)) => (position.to_string(), value),
        None => ("??".to_owned(), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::rank_display;

    #[test]
    fn unranked_sentinel() {
        assert_eq!(rank_display(None), ("??".to_owned(), 0));
        assert_eq!(rank_display(Some((3, 450))), ("3".to_owned(), 450));
    }
}
