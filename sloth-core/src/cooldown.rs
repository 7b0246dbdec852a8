use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;

/// Keyed per-user action cooldowns with TTL semantics.
///
/// Each `(user, action)` pair maps to the unix second its cooldown expires.
/// Check and update happen under one lock, so two concurrent handler
/// invocations cannot both pass the same cooldown window.
#[derive(Debug, Default)]
pub struct CooldownStore {
    entries: Mutex<HashMap<(u64, String), u64>>,
}

impl CooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to start `action` for `user_id` at `now` (unix seconds).
    ///
    /// Returns `Ok(())` and arms the cooldown when the pair is free, or
    /// `Err(remaining_seconds)` when the previous use has not expired yet.
    pub async fn try_acquire(
        &self,
        user_id: u64,
        action: &str,
        ttl: Duration,
        now: u64,
    ) -> Result<(), u64> {
        let mut entries = self.entries.lock().await;

        // Expired pairs are dropped here so the map stays bounded.
        entries.retain(|_, expires_at| *expires_at > now);

        let key = (user_id, action.to_owned());
        if let Some(expires_at) = entries.get(&key) {
            return Err(expires_at.saturating_sub(now));
        }

        entries.insert(key, now.saturating_add(ttl.as_secs()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::CooldownStore;

    #[tokio::test]
    async fn second_use_within_window_is_blocked() {
        let store = CooldownStore::new();
        let ttl = Duration::from_secs(10);

        assert_eq!(store.try_acquire(1, "rep", ttl, 100).await, Ok(()));
        assert_eq!(store.try_acquire(1, "rep", ttl, 103).await, Err(7));
    }

    #[tokio::test]
    async fn expired_window_allows_reuse() {
        let store = CooldownStore::new();
        let ttl = Duration::from_secs(10);

        assert_eq!(store.try_acquire(1, "rep", ttl, 100).await, Ok(()));
        assert_eq!(store.try_acquire(1, "rep", ttl, 110).await, Ok(()));
    }

    #[tokio::test]
    async fn pairs_are_independent() {
        let store = CooldownStore::new();
        let ttl = Duration::from_secs(10);

        assert_eq!(store.try_acquire(1, "rep", ttl, 100).await, Ok(()));
        assert_eq!(store.try_acquire(2, "rep", ttl, 100).await, Ok(()));
        assert_eq!(store.try_acquire(1, "when", ttl, 100).await, Ok(()));
    }
}
