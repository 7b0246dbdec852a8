use poise::serenity_prelude as serenity;
use tracing::error;

use sloth_core::Data;
use sloth_database::impls::currency::add_voice_seconds;
use sloth_utils::time::now_unix_secs;

/// Track voice sessions and credit their length as exchangeable activity.
///
/// A channel-to-channel move keeps the original session open; only a full
/// disconnect closes it.
pub async fn handle_voice_state(
    data: &Data,
    old: Option<&serenity::VoiceState>,
    new: &serenity::VoiceState,
) {
    if new.member.as_ref().is_some_and(|member| member.user.bot) {
        return;
    }

    let Some(guild_id) = new.guild_id else {
        return;
    };
    let user_id = new.user_id.get();
    let now = now_unix_secs();

    let was_connected = old.is_some_and(|state| state.channel_id.is_some());

    if new.channel_id.is_some() {
        if !was_connected {
            data.voice_sessions.begin(user_id, now).await;
        }
        return;
    }

    let Some(session_seconds) = data.voice_sessions.end(user_id, now).await else {
        return;
    };

    let Ok(session_seconds) = i64::try_from(session_seconds) else {
        return;
    };

    if let Err(source) = add_voice_seconds(&data.db, guild_id.get(), user_id, session_seconds).await
    {
        error!(?source, "failed to credit voice session");
    }
}
