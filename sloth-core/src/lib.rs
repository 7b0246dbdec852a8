pub mod cooldown;
pub mod voice;

use std::sync::Arc;

use sloth_database::Database;

use crate::cooldown::CooldownStore;
use crate::voice::VoiceSessions;

pub type Error = anyhow::Error;

/// Channel and guild wiring resolved from the environment at startup.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub guild_id: u64,
    /// Where level-up announcements and the daily analytics summary go.
    pub commands_channel_id: u64,
    /// Where member join/leave embeds go.
    pub join_leave_log_channel_id: u64,
    /// Optional moderation log channel for watchlist mirrors.
    pub mod_log_channel_id: Option<u64>,
}

/// Shared state handed to every command and event handler.
///
/// Capability stores (scores, currency, actions, watchlist) are reached
/// through `db` as explicit modules rather than being mixed into the handler
/// types themselves.
#[derive(Clone, Debug)]
pub struct Data {
    pub db: Database,
    pub config: BotConfig,
    pub cooldowns: Arc<CooldownStore>,
    pub voice_sessions: Arc<VoiceSessions>,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
