use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::support::{guild_only_message, no_account_message, usage_message};
use sloth_core::{Context, Error};
use sloth_database::impls::{currency, scores};
use sloth_utils::formatting::format_cooldown_remaining;
use sloth_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "rep",
    desc: "Gives someone reputation points (both sides gain score).",
    category: "reputation",
    usage: "!rep <member>",
};

/// Ten hours between reps.
const REP_COOLDOWN_SECS: u64 = 36_000;
const REP_SCORE_POINTS: i64 = 100;
const REP_LEAF_REWARD: i64 = 5;

#[poise::command(prefix_command, slash_command, category = "Reputation")]
pub async fn rep(
    ctx: Context<'_>,
    #[description = "The member to rep"] member: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let author = ctx.author();

    let Some(member) = member else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if member.id == author.id {
        ctx.say("**You cannot rep yourself!**").await?;
        return Ok(());
    }

    if member.bot {
        ctx.say("**You cannot rep a bot!**").await?;
        return Ok(());
    }

    let db = &ctx.data().db;

    let Some(author_score) = scores::get_member_score(db, guild_id.get(), author.id.get()).await?
    else {
        ctx.say("**You don't have an account yet. Send a few messages first!**")
            .await?;
        return Ok(());
    };

    if scores::get_member_score(db, guild_id.get(), member.id.get())
        .await?
        .is_none()
    {
        ctx.say(no_account_message("This member")).await?;
        return Ok(());
    }

    // The cooldown stamp lives on the author's score row, so it survives
    // restarts; the in-process store only covers short command spacing.
    let now = now_unix_secs();
    let elapsed = now.saturating_sub(author_score.last_rep_at);
    if elapsed < REP_COOLDOWN_SECS {
        let remaining = REP_COOLDOWN_SECS - elapsed;
        ctx.say(format!(
            "**Rep again in {}!**",
            format_cooldown_remaining(remaining)
        ))
        .await?;
        return Ok(());
    }

    scores::add_score_points(db, guild_id.get(), author.id.get(), REP_SCORE_POINTS).await?;
    scores::add_score_points(db, guild_id.get(), member.id.get(), REP_SCORE_POINTS).await?;
    scores::set_last_rep_at(db, guild_id.get(), author.id.get(), now).await?;
    currency::add_leaves(db, guild_id.get(), member.id.get(), REP_LEAF_REWARD).await?;

    ctx.say(format!(
        "**<@{}> repped <@{}>! 🍃The repped person got {}łł🍃**",
        author.id, member.id, REP_LEAF_REWARD
    ))
    .await?;

    Ok(())
}
