use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::support::{guild_only_message, usage_message};
use sloth_core::{Context, Error};
use sloth_database::impls::watchlist::{add_watchlist_entry, watchlist_entries};
use sloth_utils::embed::DEFAULT_EMBED_COLOR;
use sloth_utils::formatting::sanitize_mentions;
use sloth_utils::permissions::has_user_permission;
use sloth_utils::time::now_unix_secs;

pub const META: CommandMeta = CommandMeta {
    name: "watchlist",
    desc: "Adds a watchlist note for a member, or lists their notes.",
    category: "moderation",
    usage: "!watchlist <member> [note]",
};

const MAX_NOTE_LEN: usize = 960;
const MAX_LISTED_ENTRIES: usize = 15;

#[poise::command(prefix_command, slash_command, aliases("wl"), category = "Moderation")]
pub async fn watchlist(
    ctx: Context<'_>,
    #[description = "The member to watchlist"] member: Option<serenity::User>,
    #[description = "The note to record"]
    #[rest]
    note: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !has_user_permission(
        ctx.http(),
        guild_id,
        ctx.author().id,
        serenity::Permissions::MODERATE_MEMBERS,
    )
    .await?
    {
        return Ok(());
    }

    let Some(member) = member else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let db = &ctx.data().db;

    // Without a note the command lists the member's existing entries.
    let Some(note) = note.map(|raw| raw.trim().to_owned()).filter(|n| !n.is_empty()) else {
        let entries = watchlist_entries(db, guild_id.get(), member.id.get()).await?;
        if entries.is_empty() {
            ctx.say(format!("**{} has no watchlist entries.**", member.name))
                .await?;
            return Ok(());
        }

        let description = entries
            .iter()
            .rev()
            .take(MAX_LISTED_ENTRIES)
            .map(|entry| {
                format!(
                    "> <t:{}:f> • by <@{}>\n> {}",
                    entry.created_at,
                    entry.moderator_id,
                    sanitize_mentions(&entry.note)
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let embed = serenity::CreateEmbed::new()
            .title(format!("Watchlist entries ({})", entries.len()))
            .color(DEFAULT_EMBED_COLOR)
            .author(serenity::CreateEmbedAuthor::new(member.name.clone()).icon_url(member.face()))
            .description(description);

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    if note.len() > MAX_NOTE_LEN {
        ctx.say(format!(
            "**Please, inform a note that is lower than or equal to {} characters!**",
            MAX_NOTE_LEN
        ))
        .await?;
        return Ok(());
    }

    let author = ctx.author();
    let now = now_unix_secs();

    add_watchlist_entry(
        db,
        guild_id.get(),
        member.id.get(),
        author.id.get(),
        &note,
        now,
    )
    .await?;

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .author(
            serenity::CreateEmbedAuthor::new(format!("{} has been watchlisted", member.name))
                .icon_url(member.face()),
        )
        .description(format!("**Note:** {}", sanitize_mentions(&note)))
        .footer(
            serenity::CreateEmbedFooter::new(format!("Watchlisted by {}", author.name))
                .icon_url(author.face()),
        );

    ctx.send(poise::CreateReply::default().embed(embed.clone()))
        .await?;

    // Mirror the entry to the moderation log channel when one is configured.
    if let Some(mod_log_channel_id) = ctx.data().config.mod_log_channel_id {
        let channel = serenity::ChannelId::new(mod_log_channel_id);
        let log_embed = serenity::CreateEmbed::new()
            .title("__**Watchlist**__")
            .color(DEFAULT_EMBED_COLOR)
            .field(
                "User info:",
                format!("```Name: {}\nId: {}```", member.name, member.id.get()),
                false,
            )
            .field(
                "Note:",
                format!("> <t:{}:f>\n> by <@{}>\n> {}", now, author.id.get(), sanitize_mentions(&note)),
                false,
            )
            .thumbnail(member.face());

        channel
            .send_message(ctx.http(), serenity::CreateMessage::new().embed(log_embed))
            .await?;
    }

    Ok(())
}
