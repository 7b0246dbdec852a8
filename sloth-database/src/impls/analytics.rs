use anyhow::Context as _;

use crate::{
    database::Database,
    model::analytics::{AnalyticsCounters, DataBump},
};

/// Bump the day's joined-members counter.
pub async fn record_member_joined(db: &Database, guild_id: u64) -> anyhow::Result<()> {
    increment_counter(db, guild_id, "members_joined").await
}

/// Bump the day's left-members counter.
pub async fn record_member_left(db: &Database, guild_id: u64) -> anyhow::Result<()> {
    increment_counter(db, guild_id, "members_left").await
}

/// Bump the day's message counter.
pub async fn record_message(db: &Database, guild_id: u64) -> anyhow::Result<()> {
    increment_counter(db, guild_id, "messages_sent").await
}

async fn increment_counter(db: &Database, guild_id: u64, column: &str) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    // `column` is one of three literals owned by this module, never user input.
    let statement = format!(
        "INSERT INTO server_analytics (guild_id, {column}) VALUES ($1, 1)
         ON CONFLICT (guild_id) DO UPDATE SET {column} = server_analytics.{column} + 1"
    );

    sqlx::query(&statement)
        .bind(guild_id_i64)
        .execute(db.pool())
        .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct CountersRow {
    members_joined: i64,
    members_left: i64,
    messages_sent: i64,
}

/// Read the running counters for the current day.
pub async fn counters(db: &Database, guild_id: u64) -> anyhow::Result<AnalyticsCounters> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let row: Option<CountersRow> = sqlx::query_as(
        "SELECT members_joined, members_left, messages_sent
         FROM server_analytics
         WHERE guild_id = $1",
    )
    .bind(guild_id_i64)
    .fetch_optional(db.pool())
    .await?;

    let Some(row) = row else {
        return Ok(AnalyticsCounters::default());
    };

    Ok(AnalyticsCounters {
        members_joined: u64::try_from(row.members_joined)
            .context("members_joined out of u64 range")?,
        members_left: u64::try_from(row.members_left).context("members_left out of u64 range")?,
        messages_sent: u64::try_from(row.messages_sent)
            .context("messages_sent out of u64 range")?,
    })
}

/// Zero the counters once their values have been bumped into history.
pub async fn reset_counters(db: &Database, guild_id: u64) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    sqlx::query(
        "UPDATE server_analytics
         SET members_joined = 0, members_left = 0, messages_sent = 0
         WHERE guild_id = $1",
    )
    .bind(guild_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Append one day's sample to the bump history.
pub async fn bump_data(db: &Database, guild_id: u64, bump: &DataBump) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let members_joined = i64::try_from(bump.members_joined).context("members_joined overflow")?;
    let members_left = i64::try_from(bump.members_left).context("members_left overflow")?;
    let messages_sent = i64::try_from(bump.messages_sent).context("messages_sent overflow")?;
    let total_members = i64::try_from(bump.total_members).context("total_members overflow")?;
    let online_members = i64::try_from(bump.online_members).context("online_members overflow")?;
    let bumped_at = i64::try_from(bump.bumped_at).context("bumped_at overflow")?;

    sqlx::query(
        "INSERT INTO data_bumps (
            guild_id,
            members_joined,
            members_left,
            messages_sent,
            total_members,
            online_members,
            day_label,
            bumped_at
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(guild_id_i64)
    .bind(members_joined)
    .bind(members_left)
    .bind(messages_sent)
    .bind(total_members)
    .bind(online_members)
    .bind(&bump.day_label)
    .bind(bumped_at)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Chronological total-member samples, one per recorded day.
pub async fn daily_totals(db: &Database, guild_id: u64) -> anyhow::Result<Vec<i64>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let totals: Vec<i64> = sqlx::query_scalar(
        "SELECT total_members FROM data_bumps WHERE guild_id = $1 ORDER BY id ASC",
    )
    .bind(guild_id_i64)
    .fetch_all(db.pool())
    .await?;

    Ok(totals)
}

/// Chronological total-member samples, one per recorded month (the month's
/// last bump wins).
pub async fn monthly_totals(db: &Database, guild_id: u64) -> anyhow::Result<Vec<i64>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let totals: Vec<i64> = sqlx::query_scalar(
        "SELECT total_members FROM (
            SELECT DISTINCT ON (date_trunc('month', to_timestamp(bumped_at)))
                date_trunc('month', to_timestamp(bumped_at)) AS month,
                total_members
            FROM data_bumps
            WHERE guild_id = $1
            ORDER BY month ASC, bumped_at DESC
         ) AS months
         ORDER BY month ASC",
    )
    .bind(guild_id_i64)
    .fetch_all(db.pool())
    .await?;

    Ok(totals)
}

/// Day label of the most recent bump, used by the midnight task to detect
/// whether today's snapshot has already been taken.
pub async fn last_bump_day_label(db: &Database, guild_id: u64) -> anyhow::Result<Option<String>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;

    let label: Option<String> = sqlx::query_scalar(
        "SELECT day_label FROM data_bumps WHERE guild_id = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(guild_id_i64)
    .fetch_optional(db.pool())
    .await?;

    Ok(label)
}
