/// Leaf balance and exchangeable activity for one member.
#[derive(Clone, Copy, Debug)]
pub struct UserCurrency {
    pub user_id: u64,
    pub leaves: i64,
    pub messages_sent: i64,
    pub voice_seconds: i64,
}
