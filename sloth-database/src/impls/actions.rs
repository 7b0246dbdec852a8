use anyhow::Context as _;

use crate::{database::Database, model::actions::ActivityTotals};

#[derive(sqlx::FromRow)]
struct ActivityTotalsRow {
    exchanged_messages: i64,
    exchanged_voice_seconds: i64,
}

/// Sum the activity a member has already exchanged away. Added to the live
/// counters these give the all-time activity figures.
///
/// Exchange rows are written by the external economy services that share this
/// schema; this bot only consumes them.
pub async fn exchanged_activity(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<ActivityTotals> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: ActivityTotalsRow = sqlx::query_as(
        "SELECT
            COALESCE(SUM(amount) FILTER (WHERE label = 'message-exchange'), 0)
                AS exchanged_messages,
            COALESCE(SUM(amount) FILTER (WHERE label = 'time-exchange'), 0)
                AS exchanged_voice_seconds
         FROM sloth_actions
         WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_one(db.pool())
    .await?;

    Ok(ActivityTotals {
        exchanged_messages: row.exchanged_messages,
        exchanged_voice_seconds: row.exchanged_voice_seconds,
    })
}
