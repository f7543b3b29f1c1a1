//! Mock implementation of SessionStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::errors::DomainError;

use super::trait_::SessionStore;

/// Mock session store for testing
///
/// A single mutex guards all slots, which trivially makes the CAS atomic.
pub struct MockSessionStore {
    slots: Arc<Mutex<HashMap<Uuid, String>>>,
    fail_writes: AtomicBool,
}

impl MockSessionStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail with an internal error
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Snapshot of a slot without going through the trait
    pub fn peek(&self, user_id: Uuid) -> Option<String> {
        self.slots.lock().unwrap().get(&user_id).cloned()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::internal("session store unavailable"));
        }
        Ok(())
    }
}

impl Default for MockSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MockSessionStore {
    async fn set_refresh_token(&self, user_id: Uuid, token: &str) -> Result<(), DomainError> {
        self.check_writable()?;
        self.slots
            .lock()
            .unwrap()
            .insert(user_id, token.to_string());
        Ok(())
    }

    async fn get_refresh_token(&self, user_id: Uuid) -> Result<Option<String>, DomainError> {
        Ok(self.peek(user_id))
    }

    async fn clear_refresh_token(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.check_writable()?;
        self.slots.lock().unwrap().remove(&user_id);
        Ok(())
    }

    async fn compare_and_set_refresh_token(
        &self,
        user_id: Uuid,
        expected: &str,
        new: &str,
    ) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut slots = self.slots.lock().unwrap();
        match slots.get_mut(&user_id) {
            Some(current) if current.as_bytes() == expected.as_bytes() => {
                *current = new.to_string();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
