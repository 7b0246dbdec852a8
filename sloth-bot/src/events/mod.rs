pub mod member_log;
pub mod message_activity;
pub mod voice_activity;
