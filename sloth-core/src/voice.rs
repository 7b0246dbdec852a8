use std::collections::HashMap;

use tokio::sync::Mutex;

/// Open voice sessions: user id mapped to the unix second they joined.
///
/// Sessions are in-process only; a restart simply drops any open session
/// rather than crediting a bogus span.
#[derive(Debug, Default)]
pub struct VoiceSessions {
    joined_at: Mutex<HashMap<u64, u64>>,
}

impl VoiceSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a session, replacing any stale open one.
    pub async fn begin(&self, user_id: u64, now: u64) {
        let mut joined_at = self.joined_at.lock().await;
        joined_at.insert(user_id, now);
    }

    /// Close a session and return its length in seconds, if one was open.
    pub async fn end(&self, user_id: u64, now: u64) -> Option<u64> {
        let mut joined_at = self.joined_at.lock().await;
        joined_at
            .remove(&user_id)
            .map(|started| now.saturating_sub(started))
    }
}

#[cfg(test)]
mod tests {
    use super::VoiceSessions;

    #[tokio::test]
    async fn session_length_is_elapsed_seconds() {
        let sessions = VoiceSessions::new();
        sessions.begin(1, 100).await;
        assert_eq!(sessions.end(1, 160).await, Some(60));
    }

    #[tokio::test]
    async fn closing_twice_yields_nothing() {
        let sessions = VoiceSessions::new();
        sessions.begin(1, 100).await;
        assert_eq!(sessions.end(1, 160).await, Some(60));
        assert_eq!(sessions.end(1, 200).await, None);
    }

    #[tokio::test]
    async fn rejoin_replaces_the_stale_session() {
        let sessions = VoiceSessions::new();
        sessions.begin(1, 100).await;
        sessions.begin(1, 150).await;
        assert_eq!(sessions.end(1, 160).await, Some(10));
    }
}
