use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x2E_8B_57;

/// Embed color for member-joined log entries.
pub const JOIN_EMBED_COLOR: u32 = 0x57_F2_87;

/// Embed color for member-left log entries.
pub const LEAVE_EMBED_COLOR: u32 = 0xED_42_45;

/// Build a standard embed with the bot's styling.
pub fn standard_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
}
