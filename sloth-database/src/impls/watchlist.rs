use anyhow::Context as _;

use crate::{database::Database, model::watchlist::WatchlistEntry};

/// Record a watchlist note against a member.
pub async fn add_watchlist_entry(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    moderator_id: u64,
    note: &str,
    now: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let moderator_id_i64 = i64::try_from(moderator_id).context("moderator_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;

    sqlx::query(
        "INSERT INTO watchlist_entries (guild_id, user_id, moderator_id, note, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(moderator_id_i64)
    .bind(note)
    .bind(now_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct WatchlistEntryRow {
    user_id: i64,
    moderator_id: i64,
    note: String,
    created_at: i64,
}

/// All watchlist notes for a member, oldest first.
pub async fn watchlist_entries(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Vec<WatchlistEntry>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let rows: Vec<WatchlistEntryRow> = sqlx::query_as(
        "SELECT user_id, moderator_id, note, created_at
         FROM watchlist_entries
         WHERE guild_id = $1 AND user_id = $2
         ORDER BY created_at ASC, id ASC",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_all(db.pool())
    .await?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(WatchlistEntry {
            user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
            moderator_id: u64::try_from(row.moderator_id)
                .context("moderator_id row out of u64 range")?,
            note: row.note,
            created_at: u64::try_from(row.created_at).context("created_at row out of u64 range")?,
        });
    }

    Ok(out)
}
