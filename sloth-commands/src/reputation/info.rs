use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::reputation::{rank_display, to_leaderboard_rows};
use crate::support::{guild_only_message, no_account_message, pass_command_cooldown};
use sloth_analytics::progress::{DEFAULT_BAR_LENGTH, progress_bar, xp_goal};
use sloth_analytics::rank_of;
use sloth_core::{Context, Error};
use sloth_database::impls::{actions, currency, scores};
use sloth_utils::embed::DEFAULT_EMBED_COLOR;
use sloth_utils::formatting::format_hours_minutes;

pub const META: CommandMeta = CommandMeta {
    name: "info",
    desc: "Shows a member's level, reputation rank and activity.",
    category: "reputation",
    usage: "!info [member]",
};

#[poise::command(
    prefix_command,
    slash_command,
    aliases("status", "level", "lvl", "xp"),
    category = "Reputation"
)]
pub async fn info(
    ctx: Context<'_>,
    #[description = "The member to show the info for"] member: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !pass_command_cooldown(&ctx, "info").await? {
        return Ok(());
    }

    let author = ctx.author();
    let member = member.unwrap_or_else(|| author.clone());
    let db = &ctx.data().db;

    let Some(score) = scores::get_member_score(db, guild_id.get(), member.id.get()).await? else {
        let message = if member.id == author.id {
            "**You don't have an account yet. Send a few messages first!**".to_owned()
        } else {
            no_account_message(&format!("<@{}>", member.id))
        };
        ctx.say(message).await?;
        return Ok(());
    };

    let currency = currency::get_user_currency(db, guild_id.get(), member.id.get()).await?;
    let (leaves, live_messages, live_voice_seconds) = match currency {
        Some(row) => (row.leaves, row.messages_sent, row.voice_seconds),
        None => (0, 0, 0),
    };

    let snapshot = scores::score_snapshot(db, guild_id.get()).await?;
    let rows = to_leaderboard_rows(&snapshot);
    let (rank, score_points) = rank_display(rank_of(member.id.get(), &rows));

    let exchanged = actions::exchanged_activity(db, guild_id.get(), member.id.get()).await?;
    let all_messages = exchanged.exchanged_messages + live_messages;
    let all_voice_seconds = exchanged.exchanged_voice_seconds + live_voice_seconds;

    let general = format!(
        "> 🍃 **Balance**: {}łł\n\
         > 📈 **All Time Activity**: {} and {} messages.\n\
         > 💰 **Exchangeable Activity**: {} and {} messages.\n\
         > 🏆 **Reputation**: {} pts | #{}",
        leaves,
        format_hours_minutes(all_voice_seconds),
        all_messages,
        format_hours_minutes(live_voice_seconds),
        live_messages,
        score_points,
        rank,
    );

    let bar = progress_bar(score.level, score.xp, xp_goal(score.level), DEFAULT_BAR_LENGTH);

    let embed = serenity::CreateEmbed::new()
        .title("__All Information__")
        .color(DEFAULT_EMBED_COLOR)
        .author(serenity::CreateEmbedAuthor::new(member.name.clone()).icon_url(member.face()))
        .thumbnail(member.face())
        .field("__**`General`**__", general, true)
        .field("__**`Progress Bar`:**__", bar, false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}
