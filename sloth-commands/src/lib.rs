pub mod analytics;
pub mod moderation;
pub mod reputation;
pub mod support;
pub mod utility;

use sloth_core::{Data, Error};

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    analytics::when::META,
    reputation::info::META,
    reputation::leaderboard::META,
    reputation::rep::META,
    moderation::watchlist::META,
    utility::ping::META,
    utility::help::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        analytics::when::when(),
        reputation::info::info(),
        reputation::leaderboard::leaderboard(),
        reputation::rep::rep(),
        moderation::watchlist::watchlist(),
        utility::ping::ping(),
        utility::help::help(),
    ]
}
