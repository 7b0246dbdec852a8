mod events;
mod snapshot;

use std::env;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use sloth_core::{BotConfig, Data, Error, cooldown::CooldownStore, voice::VoiceSessions};
use sloth_database::{CacheService, Database, MIGRATOR};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    // Store Discord Bot Token
    let token = env::var("DISCORD_TOKEN")?;
    let database_url = env::var("DATABASE_URL")?;

    let guild_id = env::var("DISCORD_GUILD_ID")?.parse::<u64>()?;
    let commands_channel_id = env::var("COMMANDS_CHANNEL_ID")?.parse::<u64>()?;
    let join_leave_log_channel_id = env::var("JOIN_LEAVE_LOG_CHANNEL_ID")?.parse::<u64>()?;
    let mod_log_channel_id = env::var("MOD_LOG_CHANNEL_ID")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok());

    let config = BotConfig {
        guild_id,
        commands_channel_id,
        join_leave_log_channel_id,
        mod_log_channel_id,
    };

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let redis_enabled = env_bool("REDIS_ENABLED", false);
    let redis_key_prefix = env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "sloth:prod".to_string());

    let cache = if redis_enabled {
        match env::var("REDIS_URL") {
            Ok(redis_url) => match CacheService::redis(&redis_url, redis_key_prefix.clone()) {
                Ok(cache) => {
                    info!(key_prefix = %redis_key_prefix, "Redis cache enabled.");
                    cache
                }
                Err(err) => {
                    warn!(?err, key_prefix = %redis_key_prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
                    CacheService::disabled(redis_key_prefix.clone())
                }
            },
            Err(_) => {
                warn!(key_prefix = %redis_key_prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
                CacheService::disabled(redis_key_prefix.clone())
            }
        }
    } else {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(redis_key_prefix.clone())
    };

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            );
        } else {
            info!("Redis cache health check passed.");
        }
    }

    let db = Database::with_cache(db_pool, cache);

    let auto_run_migrations = env_bool("AUTO_RUN_MIGRATIONS", true);
    if auto_run_migrations {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    // GUILD_PRESENCES feeds the daily online-member sample; GUILD_VOICE_STATES
    // feeds the voice-time activity tracker.
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_PRESENCES
        | serenity::GatewayIntents::GUILD_VOICE_STATES;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: sloth_commands::commands(),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(sloth_utils::COMMAND_PREFIX.to_string()),
                mention_as_prefix: false,
                ..Default::default()
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            let db = db.clone();
            Box::pin(async move {
                info!("Sloth has awoken!");

                poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    serenity::GuildId::new(guild_id),
                )
                .await?;

                let data = Data {
                    db,
                    config,
                    cooldowns: Arc::new(CooldownStore::new()),
                    voice_sessions: Arc::new(VoiceSessions::new()),
                };

                let _snapshot_task = snapshot::spawn_daily_snapshot(ctx.clone(), data.clone());

                Ok(data)
            })
        })
        .build();

    info!("Sloth is connecting...");

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, "command error");

            let embed = serenity::CreateEmbed::new()
                .title("Command Error")
                .description("Something went wrong while running this command.")
                .color(sloth_utils::embed::DEFAULT_EMBED_COLOR);

            let _ = ctx
                .send(poise::CreateReply::default().ephemeral(true).embed(embed))
                .await;
        }
        poise::FrameworkError::ArgumentParse { ctx, input, .. } => {
            let usage = format!("Usage: `!{}`", ctx.command().qualified_name);
            let description = if let Some(input) = input {
                format!("Invalid argument: `{}`\n{}", input, usage)
            } else {
                format!("Missing required argument.\n{}", usage)
            };

            let _ = ctx.say(description).await;
        }
        poise::FrameworkError::UnknownCommand { .. } => {
            debug!("unknown command invocation");
        }
        other => {
            error!(?other, "framework error");
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            events::message_activity::handle_message(ctx, data, new_message).await;
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            events::member_log::handle_member_join(ctx, data, new_member).await;
        }
        serenity::FullEvent::GuildMemberRemoval {
            guild_id,
            user,
            member_data_if_available,
        } => {
            events::member_log::handle_member_leave(
                ctx,
                data,
                *guild_id,
                user,
                member_data_if_available.as_ref(),
            )
            .await;
        }
        serenity::FullEvent::VoiceStateUpdate { old, new } => {
            events::voice_activity::handle_voice_state(data, old.as_ref(), new).await;
        }
        _ => {}
    }

    Ok(())
}
