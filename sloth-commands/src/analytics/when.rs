use chrono::Utc;
use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::support::{guild_only_message, pass_command_cooldown};
use sloth_analytics::{GrowthError, average_growth, predict};
use sloth_core::{Context, Error};
use sloth_database::impls::analytics::{daily_totals, monthly_totals};
use sloth_utils::embed::DEFAULT_EMBED_COLOR;

pub const META: CommandMeta = CommandMeta {
    name: "when",
    desc: "Estimates when the server will hit the given member count.",
    category: "analytics",
    usage: "!when <goal> [daily|monthly]",
};

/// Six digits of members is already beyond any goal this server will see.
const MAX_GOAL_DIGITS: usize = 6;

/// Which bucket of the bump history the average growth rate is taken over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, poise::ChoiceParameter)]
pub enum GrowthPeriod {
    #[default]
    #[name = "Daily"]
    Daily,
    #[name = "Monthly"]
    Monthly,
}

impl GrowthPeriod {
    fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

#[poise::command(prefix_command, slash_command, category = "Analytics")]
pub async fn when(
    ctx: Context<'_>,
    #[description = "The goal member count"] future: Option<i64>,
    #[description = "The growth period to average over"] period: Option<GrowthPeriod>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    if !pass_command_cooldown(&ctx, "when").await? {
        return Ok(());
    }

    let Some(future) = future.filter(|goal| *goal > 0) else {
        ctx.say("**Please, inform a future value (goal value)!**")
            .await?;
        return Ok(());
    };

    if future.to_string().len() > MAX_GOAL_DIGITS {
        ctx.say("**Don't try to troll!**").await?;
        return Ok(());
    }

    let period = period.unwrap_or_default();
    let totals = match period {
        GrowthPeriod::Daily => daily_totals(&ctx.data().db, guild_id.get()).await?,
        GrowthPeriod::Monthly => monthly_totals(&ctx.data().db, guild_id.get()).await?,
    };

    let rate = match average_growth(&totals) {
        Ok(rate) => rate,
        Err(GrowthError::EmptyHistory) => {
            ctx.say("**I don't have enough member history to estimate that yet!**")
                .await?;
            return Ok(());
        }
        Err(source) => return Err(source.into()),
    };

    if rate <= 0.0 {
        ctx.say(format!(
            "**I'm afraid I can't calculate it, because you have a negative PR of `{:.2}%`**",
            rate
        ))
        .await?;
        return Ok(());
    }

    let present = {
        let Some(guild) = ctx.guild() else {
            ctx.say(guild_only_message()).await?;
            return Ok(());
        };
        guild.member_count as i64
    };

    if present >= future {
        ctx.say("**It looks like the server already reached that number!**")
            .await?;
        return Ok(());
    }

    let prediction = predict(present, future, rate, Utc::now())?;

    let embed = serenity::CreateEmbed::new()
        .title("Future Value Estimation")
        .description(format!(
            "Considering an average {} Growth Percentage Rate of `{:.2}%`",
            period.label(),
            rate
        ))
        .color(DEFAULT_EMBED_COLOR)
        .field(
            "Projection",
            format!("```apache\n{}```", prediction.describe()),
            false,
        );

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::GrowthPeriod;

    #[test]
    fn daily_is_the_default_period() {
        assert_eq!(GrowthPeriod::default(), GrowthPeriod::Daily);
    }

    #[test]
    fn period_labels() {
        assert_eq!(GrowthPeriod::Daily.label(), "daily");
        assert_eq!(GrowthPeriod::Monthly.label(), "monthly");
    }
}
