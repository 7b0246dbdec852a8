use std::time::Duration;

use sloth_core::{Context, Error};
use sloth_utils::time::now_unix_secs;

/// Per-user spacing between invocations of the same command.
pub const COMMAND_COOLDOWN: Duration = Duration::from_secs(5);

pub fn guild_only_message() -> &'static str {
    "This command only works inside a server."
}

pub fn usage_message(usage: &str) -> String {
    format!("Usage: `{}`", usage)
}

pub fn no_account_message(mention: &str) -> String {
    format!("**{} doesn't have an account yet!**", mention)
}

/// Gate a command behind the keyed cooldown store. Replies with the time
/// left and returns `false` when the user is still inside the window.
pub async fn pass_command_cooldown(ctx: &Context<'_>, action: &'static str) -> Result<bool, Error> {
    let acquired = ctx
        .data()
        .cooldowns
        .try_acquire(
            ctx.author().id.get(),
            action,
            COMMAND_COOLDOWN,
            now_unix_secs(),
        )
        .await;

    match acquired {
        Ok(()) => Ok(true),
        Err(remaining) => {
            ctx.say(format!(
                "**Slow down! Try again in {} second(s).**",
                remaining.max(1)
            ))
            .await?;
            Ok(false)
        }
    }
}
