use poise::serenity_prelude as serenity;
use tracing::error;

use sloth_analytics::progress::level_from_xp;
use sloth_core::Data;
use sloth_database::impls::analytics::record_message;
use sloth_database::impls::currency::{add_leaves, record_message_activity};
use sloth_database::impls::scores::{
    apply_level_up, award_xp, ensure_member_score, get_member_score,
};
use sloth_utils::time::now_unix_secs;

/// XP granted per counted message.
const XP_PER_MESSAGE: i64 = 5;

/// Minimum seconds between two XP awards for the same member.
const XP_SPACING_SECS: u64 = 3;

/// Score points granted on level-up.
const LEVEL_UP_SCORE_BONUS: i64 = 100;

/// Leaves granted on level-up, multiplied by the new level.
const LEVEL_UP_LEAVES_PER_LEVEL: i64 = 5;

/// Feed one guild message through the analytics counter, the activity
/// tracker, and the XP pipeline.
pub async fn handle_message(ctx: &serenity::Context, data: &Data, message: &serenity::Message) {
    // Ignore bots and webhooks.
    if message.author.bot || message.webhook_id.is_some() {
        return;
    }

    let Some(guild_id) = message.guild_id else {
        return;
    };
    let guild_id = guild_id.get();
    let user_id = message.author.id.get();

    if let Err(source) = record_message(&data.db, guild_id).await {
        error!(?source, "failed to record message count");
    }

    if let Err(source) = record_message_activity(&data.db, guild_id, user_id).await {
        error!(?source, "failed to record message activity");
    }

    if let Err(source) = grant_message_xp(ctx, data, guild_id, message).await {
        error!(?source, "failed to grant message xp");
    }
}

async fn grant_message_xp(
    ctx: &serenity::Context,
    data: &Data,
    guild_id: u64,
    message: &serenity::Message,
) -> anyhow::Result<()> {
    let user_id = message.author.id.get();

    ensure_member_score(&data.db, guild_id, user_id).await?;
    let Some(score) = get_member_score(&data.db, guild_id, user_id).await? else {
        return Ok(());
    };

    let now = now_unix_secs();
    let spaced_out = now.saturating_sub(score.last_xp_at) >= XP_SPACING_SECS;
    if !spaced_out && score.xp != 0 {
        return Ok(());
    }

    award_xp(&data.db, guild_id, user_id, XP_PER_MESSAGE, now).await?;

    let entitled_level = level_from_xp(score.xp + XP_PER_MESSAGE);
    if score.level >= entitled_level {
        return Ok(());
    }

    let new_level = score.level + 1;
    let leaf_reward = new_level * LEVEL_UP_LEAVES_PER_LEVEL;

    apply_level_up(&data.db, guild_id, user_id, LEVEL_UP_SCORE_BONUS).await?;
    add_leaves(&data.db, guild_id, user_id, leaf_reward).await?;

    let announcement = format!(
        "**<@{}> has leveled up to lvl {}! 🍃Here's {}łł!🍃**",
        message.author.id, new_level, leaf_reward,
    );

    serenity::ChannelId::new(data.config.commands_channel_id)
        .say(&ctx.http, announcement)
        .await?;

    Ok(())
}
