use poise::serenity_prelude as serenity;
use tracing::error;

use sloth_core::Data;
use sloth_database::impls::analytics::{record_member_joined, record_member_left};
use sloth_utils::embed::{JOIN_EMBED_COLOR, LEAVE_EMBED_COLOR};
use sloth_utils::formatting::format_days_hours_minutes;
use sloth_utils::time::now_unix_secs;

/// Count a new member towards the day's analytics and post a join embed to
/// the join/leave log channel.
pub async fn handle_member_join(ctx: &serenity::Context, data: &Data, member: &serenity::Member) {
    let guild_id = member.guild_id.get();

    if let Err(source) = record_member_joined(&data.db, guild_id).await {
        error!(?source, "failed to record member join");
    }

    let created_at = member.user.created_at().unix_timestamp();
    let account_age_seconds = i64::try_from(now_unix_secs())
        .unwrap_or(created_at)
        .saturating_sub(created_at);

    let description = format!(
        "<@{}> joined the server.\n\n**Account Created:** <t:{}:R>\n**Account Age:** {}",
        member.user.id,
        created_at,
        format_days_hours_minutes(account_age_seconds),
    );

    let embed = serenity::CreateEmbed::new()
        .title("Member Joined")
        .description(description)
        .color(JOIN_EMBED_COLOR)
        .thumbnail(member.user.face())
        .footer(serenity::CreateEmbedFooter::new(format!(
            "ID: {}",
            member.user.id
        )));

    send_log_embed(ctx, data, embed).await;
}

/// Count a departure towards the day's analytics and post a leave embed to
/// the join/leave log channel.
pub async fn handle_member_leave(
    ctx: &serenity::Context,
    data: &Data,
    guild_id: serenity::GuildId,
    user: &serenity::User,
    member: Option<&serenity::Member>,
) {
    if let Err(source) = record_member_left(&data.db, guild_id.get()).await {
        error!(?source, "failed to record member leave");
    }

    let mut lines = vec![format!("<@{}> left the server.", user.id)];

    if let Some(joined_at) = member.and_then(|m| m.joined_at) {
        lines.push(format!(
            "\n**Joined:** <t:{}:R>",
            joined_at.unix_timestamp()
        ));
    }
    lines.push(format!("**Left:** <t:{}:R>", now_unix_secs()));

    if let Some(member) = member {
        if !member.roles.is_empty() {
            let roles = member
                .roles
                .iter()
                .map(|role_id| format!("<@&{}>", role_id))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("**Roles:** {}", roles));
        }
    }

    let embed = serenity::CreateEmbed::new()
        .title("Member Left")
        .description(lines.join("\n"))
        .color(LEAVE_EMBED_COLOR)
        .thumbnail(user.face())
        .footer(serenity::CreateEmbedFooter::new(format!("ID: {}", user.id)));

    send_log_embed(ctx, data, embed).await;
}

async fn send_log_embed(ctx: &serenity::Context, data: &Data, embed: serenity::CreateEmbed) {
    let channel = serenity::ChannelId::new(data.config.join_leave_log_channel_id);

    if let Err(source) = channel
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, "failed to post join/leave log embed");
    }
}
