use std::time::Duration;

use chrono::Utc;
use poise::serenity_prelude as serenity;
use tracing::{error, info};

use sloth_core::Data;
use sloth_database::impls::analytics::{
    bump_data, counters, last_bump_day_label, reset_counters,
};
use sloth_database::model::analytics::DataBump;
use sloth_utils::embed::standard_embed;
use sloth_utils::time::{day_label, now_unix_secs};

const CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn the daily snapshot task.
///
/// Once per minute it compares today's label against the last recorded bump;
/// on the first check of a new day it appends the day's counters and member
/// totals to history, posts a summary, and zeroes the counters.
pub fn spawn_daily_snapshot(ctx: serenity::Context, data: Data) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CHECK_INTERVAL);

        loop {
            interval.tick().await;

            if let Err(source) = snapshot_if_new_day(&ctx, &data).await {
                error!(?source, "daily snapshot failed");
            }
        }
    })
}

async fn snapshot_if_new_day(ctx: &serenity::Context, data: &Data) -> anyhow::Result<()> {
    let guild_id = data.config.guild_id;
    let today = day_label(Utc::now());

    let last_label = last_bump_day_label(&data.db, guild_id).await?;
    if last_label.as_deref() == Some(today.as_str()) {
        return Ok(());
    }

    // Cache guard must not be held across an await.
    let member_totals = {
        let Some(guild) = ctx.cache.guild(serenity::GuildId::new(guild_id)) else {
            return Ok(());
        };

        let online_members = guild
            .presences
            .values()
            .filter(|presence| presence.status != serenity::OnlineStatus::Offline)
            .count() as u64;

        (guild.member_count, online_members)
    };
    let (total_members, online_members) = member_totals;

    let day_counters = counters(&data.db, guild_id).await?;

    let bump = DataBump {
        members_joined: day_counters.members_joined,
        members_left: day_counters.members_left,
        messages_sent: day_counters.messages_sent,
        total_members,
        online_members,
        day_label: today.clone(),
        bumped_at: now_unix_secs(),
    };

    bump_data(&data.db, guild_id, &bump).await?;
    reset_counters(&data.db, guild_id).await?;

    info!(day = %today, total_members, "daily analytics snapshot recorded");

    let description = format!(
        "**Members Joined:** {}\n**Members Left:** {}\n**Messages Sent:** {}\n\n\
         **Total Members:** {}\n**Online Members:** {}",
        bump.members_joined,
        bump.members_left,
        bump.messages_sent,
        bump.total_members,
        bump.online_members,
    );

    let embed = standard_embed(&format!("📊 Server Analytics: {}", today), description);

    serenity::ChannelId::new(data.config.commands_channel_id)
        .send_message(&ctx.http, serenity::CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
