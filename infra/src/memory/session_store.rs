use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use sv_core::errors::DomainError;
use sv_core::repositories::SessionStore;

/// Session slots keyed by user id
///
/// Each operation holds the shard lock for its key for its whole duration,
/// which makes compare-and-set atomic per subject while distinct subjects
/// proceed in parallel.
#[derive(Default)]
pub struct InMemorySessionStore {
    slots: DashMap<Uuid, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub fn live_sessions(&self) -> usize {
        self.slots.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set_refresh_token(&self, user_id: Uuid, token: &str) -> Result<(), DomainError> {
        self.slots.insert(user_id, token.to_string());
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, DomainError> {
        Ok(self.slots.get(&user_id).map(|slot| slot.value().clone()))
    }

    async fn clear_refresh_token(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.slots.remove(&user_id);
        Ok(())
    }

    async fn compare_and_set_refresh_token(
        &self,
        user_id: Uuid,
        expected: &str,
        new: &str,
    ) -> Result<bool, DomainError> {
        match self.slots.get_mut(&user_id) {
            Some(mut slot) if slot.as_bytes() == expected.as_bytes() => {
                *slot = new.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_slot_lifecycle() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();

        assert_eq!(store.get_refresh_token(id).await.unwrap(), None);
        store.set_refresh_token(id, "t1").await.unwrap();
        assert_eq!(store.get_refresh_token(id).await.unwrap().as_deref(), Some("t1"));

        store.clear_refresh_token(id).await.unwrap();
        store.clear_refresh_token(id).await.unwrap();
        assert_eq!(store.live_sessions(), 0);
    }

    #[tokio::test]
    async fn test_compare_and_set() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();

        assert!(!store.compare_and_set_refresh_token(id, "t1", "t2").await.unwrap());
        assert_eq!(store.get_refresh_token(id).await.unwrap(), None);

        store.set_refresh_token(id, "t1").await.unwrap();
        assert!(store.compare_and_set_refresh_token(id, "t1", "t2").await.unwrap());
        assert!(!store.compare_and_set_refresh_token(id, "t1", "t3").await.unwrap());
        assert_eq!(store.get_refresh_token(id).await.unwrap().as_deref(), Some("t2"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_parallel_compare_and_set_single_winner() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = Uuid::new_v4();
        store.set_refresh_token(id, "shared").await.unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .compare_and_set_refresh_token(id, "shared", &format!("next-{}", i))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let wins = futures_util::future::join_all(handles)
            .await
            .into_iter()
            .filter(|r| *r.as_ref().unwrap())
            .count();
        assert_eq!(wins, 1);
    }
}
