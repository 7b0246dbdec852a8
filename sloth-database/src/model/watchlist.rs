/// One watchlist note recorded against a member.
#[derive(Clone, Debug)]
pub struct WatchlistEntry {
    pub user_id: u64,
    pub moderator_id: u64,
    pub note: String,
    pub created_at: u64,
}
