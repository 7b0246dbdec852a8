use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::reputation::{rank_display, to_leaderboard_rows};
use crate::support::{guild_only_message, pass_command_cooldown};
use sloth_analytics::rank_of;
use sloth_core::{Context, Error};
use sloth_database::impls::{currency, scores};
use sloth_database::model::scores::MetricRow;
use sloth_utils::embed::DEFAULT_EMBED_COLOR;
use sloth_utils::formatting::format_hours_minutes_compact;

pub const META: CommandMeta = CommandMeta {
    name: "leaderboard",
    desc: "Shows the top ten members for a tracked metric.",
    category: "reputation",
    usage: "!leaderboard <reputation|level|leaves|time>",
};

const TOP_COUNT: usize = 10;

#[derive(poise::ChoiceParameter)]
pub enum LeaderboardMetric {
    #[name = "Reputation"]
    Reputation,
    #[name = "Level"]
    Level,
    #[name = "Leaves"]
    Leaves,
    #[name = "Time"]
    Time,
}

#[poise::command(
    prefix_command,
    slash_command,
    aliases("lb", "score", "scoreboard"),
    category = "Reputation"
)]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "The leaderboard to show"] metric: Option<LeaderboardMetric>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !pass_command_cooldown(&ctx, "leaderboard").await? {
        return Ok(());
    }

    let metric = metric.unwrap_or(LeaderboardMetric::Reputation);
    let db = &ctx.data().db;

    match metric {
        LeaderboardMetric::Reputation => {
            let snapshot = scores::score_snapshot(db, guild_id.get()).await?;
            let embed = metric_board(
                &ctx,
                "__The Sloth Leaderboard__",
                &snapshot,
                "Your score",
                |value| format!("__**Score:**__ `{}`", value),
                |value| format!("{}", value),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        LeaderboardMetric::Level => {
            let embed = level_board(&ctx, guild_id.get()).await?;
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        LeaderboardMetric::Leaves => {
            let snapshot = currency::leaves_snapshot(db, guild_id.get()).await?;
            let embed = metric_board(
                &ctx,
                "🍃 __The Sloth Leaf Ranking Leaderboard__ 🍃",
                &snapshot,
                "Your leaves",
                |value| format!("__**Leaves:**__ `{}` 🍃", value),
                |value| format!("{} 🍃", value),
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        LeaderboardMetric::Time => {
            let snapshot = currency::voice_snapshot(db, guild_id.get()).await?;
            let embed = metric_board(
                &ctx,
                "⏰ __The Sloth Time Ranking Leaderboard__ ⏰",
                &snapshot,
                "Your time",
                |value| format!("__**Time:**__ `{}` ⏰", format_hours_minutes_compact(value)),
                format_hours_minutes_compact,
            );
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
    }

    Ok(())
}

/// Top-ten embed over one ordered metric snapshot, with the caller's own
/// rank and value in the footer.
fn metric_board(
    ctx: &Context<'_>,
    title: &str,
    snapshot: &[MetricRow],
    footer_label: &str,
    format_entry: impl Fn(i64) -> String,
    format_footer_value: impl Fn(i64) -> String,
) -> serenity::CreateEmbed {
    let rows = to_leaderboard_rows(snapshot);
    let (rank, value) = rank_display(rank_of(ctx.author().id.get(), &rows));

    let mut embed = serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .footer(
            serenity::CreateEmbedFooter::new(format!(
                "{}: {} | #{}",
                footer_label,
                format_footer_value(value),
                rank
            ))
            .icon_url(ctx.author().face()),
        );

    for (index, row) in snapshot.iter().take(TOP_COUNT).enumerate() {
        embed = embed.field(
            format!("[{}]#", index + 1),
            format!("<@{}> • {}", row.user_id, format_entry(row.value)),
            false,
        );
    }

    embed
}

/// The level board shows both level and XP, so it reads full score rows for
/// the top ten and ranks the caller against the XP snapshot.
async fn level_board(ctx: &Context<'_>, guild_id: u64) -> Result<serenity::CreateEmbed, Error> {
    let db = &ctx.data().db;

    let top = scores::top_by_xp(db, guild_id, TOP_COUNT as u32).await?;
    let snapshot = scores::xp_snapshot(db, guild_id).await?;
    let rows = to_leaderboard_rows(&snapshot);
    let (rank, xp) = rank_display(rank_of(ctx.author().id.get(), &rows));

    let mut embed = serenity::CreateEmbed::new()
        .title("__The Sloth Level Ranking Leaderboard__")
        .color(DEFAULT_EMBED_COLOR)
        .footer(
            serenity::CreateEmbedFooter::new(format!("Your XP: {} | #{}", xp, rank))
                .icon_url(ctx.author().face()),
        );

    for (index, row) in top.iter().enumerate() {
        embed = embed.field(
            format!("[{}]#", index + 1),
            format!(
                "<@{}> • __**Level:**__ `{}` | __**XP:**__ `{}`",
                row.user_id, row.level, row.xp
            ),
            false,
        );
    }

    Ok(embed)
}
