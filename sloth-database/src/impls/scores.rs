use anyhow::Context as _;

use crate::{
    cache::{LEADERBOARD_SNAPSHOT_TTL, leaderboard_snapshot_key},
    database::Database,
    model::scores::{MemberScore, MetricRow},
};

#[derive(sqlx::FromRow)]
struct MemberScoreRow {
    user_id: i64,
    xp: i64,
    level: i64,
    last_xp_at: i64,
    score_points: i64,
    last_rep_at: i64,
}

#[derive(sqlx::FromRow)]
struct MetricRowRecord {
    user_id: i64,
    value: i64,
}

/// Fetch one member's reputation row, if they have an account.
pub async fn get_member_score(
    db: &Database,
    guild_id: u64,
    user_id: u64,
) -> anyhow::Result<Option<MemberScore>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    let row: Option<MemberScoreRow> = sqlx::query_as(
        "SELECT user_id, xp, level, last_xp_at, score_points, last_rep_at
         FROM members_score
         WHERE guild_id = $1 AND user_id = $2",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .fetch_optional(db.pool())
    .await?;

    row.map(to_member_score).transpose()
}

/// Create an empty reputation row for a member unless one already exists.
pub async fn ensure_member_score(db: &Database, guild_id: u64, user_id: u64) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "INSERT INTO members_score (guild_id, user_id) VALUES ($1, $2)
         ON CONFLICT (guild_id, user_id) DO NOTHING",
    )
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Add message XP and stamp the award time.
pub async fn award_xp(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    amount: i64,
    now: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;

    sqlx::query(
        "UPDATE members_score
         SET xp = xp + $1, last_xp_at = $2
         WHERE guild_id = $3 AND user_id = $4",
    )
    .bind(amount)
    .bind(now_i64)
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Advance a member one level and grant the level-up score bonus.
pub async fn apply_level_up(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    score_bonus: i64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "UPDATE members_score
         SET level = level + 1, score_points = score_points + $1
         WHERE guild_id = $2 AND user_id = $3",
    )
    .bind(score_bonus)
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Add reputation score points to a member.
pub async fn add_score_points(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    amount: i64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;

    sqlx::query(
        "UPDATE members_score
         SET score_points = score_points + $1
         WHERE guild_id = $2 AND user_id = $3",
    )
    .bind(amount)
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Stamp the rep cooldown start for a member.
pub async fn set_last_rep_at(
    db: &Database,
    guild_id: u64,
    user_id: u64,
    now: u64,
) -> anyhow::Result<()> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let user_id_i64 = i64::try_from(user_id).context("user_id out of i64 range")?;
    let now_i64 = i64::try_from(now).context("now out of i64 range")?;

    sqlx::query(
        "UPDATE members_score
         SET last_rep_at = $1
         WHERE guild_id = $2 AND user_id = $3",
    )
    .bind(now_i64)
    .bind(guild_id_i64)
    .bind(user_id_i64)
    .execute(db.pool())
    .await?;

    Ok(())
}

/// Full snapshot of all members ordered by score points (highest first).
///
/// Read through the cache: leaderboard commands call this twice in quick
/// succession (top ten plus the caller's own rank).
pub async fn score_snapshot(db: &Database, guild_id: u64) -> anyhow::Result<Vec<MetricRow>> {
    let key = leaderboard_snapshot_key(db.cache(), guild_id, "score");

    db.cache()
        .get_or_load_json(&key, LEADERBOARD_SNAPSHOT_TTL, || async {
            metric_snapshot(db, guild_id, "score_points").await
        })
        .await
}

/// Full snapshot of all members ordered by XP (highest first).
pub async fn xp_snapshot(db: &Database, guild_id: u64) -> anyhow::Result<Vec<MetricRow>> {
    let key = leaderboard_snapshot_key(db.cache(), guild_id, "xp");

    db.cache()
        .get_or_load_json(&key, LEADERBOARD_SNAPSHOT_TTL, || async {
            metric_snapshot(db, guild_id, "xp").await
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
         FROM members_score
         WHERE guild_id = $1
         ORDER BY {column} DESC, user_id ASC"
    );

    let rows: Vec<MetricRowRecord> = sqlx::query_as(&statement)
        .bind(guild_id_i64)
        .fetch_all(db.pool())
        .await?;

    rows.into_iter().map(to_metric_row).collect()
}

/// Top members by XP with their full rows, for the level leaderboard display.
pub async fn top_by_xp(
    db: &Database,
    guild_id: u64,
    limit: u32,
) -> anyhow::Result<Vec<MemberScore>> {
    let guild_id_i64 = i64::try_from(guild_id).context("guild_id out of i64 range")?;
    let limit_i64 = i64::from(limit.clamp(1, 100));

    let rows: Vec<MemberScoreRow> = sqlx::query_as(
        "SELECT user_id, xp, level, last_xp_at, score_points, last_rep_at
         FROM members_score
         WHERE guild_id = $1
         ORDER BY xp DESC, user_id ASC
         LIMIT $2",
    )
    .bind(guild_id_i64)
    .bind(limit_i64)
    .fetch_all(db.pool())
    .await?;

    rows.into_iter().map(to_member_score).collect()
}

fn to_member_score(row: MemberScoreRow) -> anyhow::Result<MemberScore> {
    Ok(MemberScore {
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        xp: row.xp,
        level: row.level,
        last_xp_at: u64::try_from(row.last_xp_at).context("last_xp_at row out of u64 range")?,
        score_points: row.score_points,
        last_rep_at: u64::try_from(row.last_rep_at).context("last_rep_at row out of u64 range")?,
    })
}

fn to_metric_row(row: MetricRowRecord) -> anyhow::Result<MetricRow> {
    Ok(MetricRow {
        user_id: u64::try_from(row.user_id).context("user_id row out of u64 range")?,
        value: row.value,
    })
}
