use anyhow::Context as _;

use crate::{
    cache::{LEADERBOARD_SNAPSHOT_TTL, leaderboard_snapshot_key},
    database::Database,
    model::{currency::UserCurrency, scores::MetricRow},
};

#[derive(sqlx::FromRow)]
struct UserCurrencyRow {
    user_id: i64,
    leaves: i64,
    messages_sent: i64,
    voice_seconds: i64,
}

#[derive(sqlx::FromRow)]
struct MetricRowRecord {
    user_id: i64,
    value: i64,
}

/// Fetch one member's currency row, if they have one.
pub async fn get_user_currency(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Option<UserCurrency>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<UserCurrencyRow> = sqlx::query_as(
        "SELECT user_id, leaves, messages_sent, voice_seconds
         FROM user_currency
         WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_user_currency).transpose()
}

/// Credit (or debit, with a negative amount) a member's leaf balance.
pub async fn add_leaves(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    amount: i64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO user_currency (guild_id, user_id, leaves) VALUES ($1, $2, $3)
         ON CONFLICT (guild_id, user_id) DO UPDATE SET leaves = user_currency.leaves + $3",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(amount)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Count one message towards a member's exchangeable activity.
pub async fn record_message_activity(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO user_currency (guild_id, user_id, messages_sent) VALUES ($1, $2, 1)
         ON CONFLICT (guild_id, user_id)
         DO UPDATE SET messages_sent = user_currency.messages_sent + 1",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Add voice time (seconds) to a member's exchangeable activity.
pub async fn add_voice_seconds(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    seconds: i64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO user_currency (guild_id, user_id, voice_seconds) VALUES ($1, $2, $3)
         ON CONFLICT (guild_id, user_id)
         DO UPDATE SET voice_seconds = user_currency.voice_seconds + $3",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .bind(seconds)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Full snapshot of all members ordered by leaf balance (highest first).
pub async fn leaves_snapshot(db: &Database, guild_id: u64) -> anyhow::Result<Vec<MetricRow>> {
    let key = leaderboard_snapshot_key(db.cache(), guild_id, "leaves");

    db.cache()
        .get_or_load_json(&key, LEADERBOARD_SNAPSHOT_TTL, || async {
            metric_snapshot(db, guild_id, "leaves").await
        })
        .await
}

/// Full snapshot of all members ordered by voice time (highest first).
pub async fn voice_snapshot(db: &Database, guild_id: u64) -> anyhow::Result<Vec<MetricRow>> {
    let key = leaderboard_snapshot_key(db.cache(), guild_id, "voice");

    db.cache()
        .get_or_load_json(&key, LEADERBOARD_SNAPSHOT_TTL, || async {
            metric_snapshot(db, guild_id, "voice_seconds").await
        })
        .await
}

async fn metric_snapshot(
    db: &Database,
    guild_id: u64,
    column: &str,
) -> anyhow::Result<Vec<MetricRow>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    // `column` is a module-owned literal, never user input.
    let statement = format!(
        "SELECT user_id, {column} AS value
         FROM user_currency
         WHERE guild_id = $1
         ORDER BY {column} DESC, user_id ASC"
    );

    let rows: Vec<MetricRowRecord> = sqlx::query_as(&statement)
        .bind(guild_id_i64)
        .fetch_all(db.pool())
        .await?;

    rows.into_iter()
        .map(|row| {
            Ok(MetricRow {
                user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
                value: row.value,
            })
        })
        .collect()
}

fn to_user_currency(row: UserCurrencyRow) -> anyhow::Result<UserCurrency> {
    Ok(UserCurrency {
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        leaves: row.leaves,
        messages_sent: row.messages_sent,
        voice_seconds: row.voice_seconds,
    })
}
