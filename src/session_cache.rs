//! Client session cache — the last-fetched identity for one browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed explicitly by whoever owns the tab lifecycle (the portal
//! client, a test) and handed to consumers. Reset on logout; a fresh
//! instance stands in for a tab reload.

use std::sync::{Arc, PoisonError, RwLock};

use crate::identity::UserIdentity;

/// Single mutable slot holding `Some(user)` after login, `None` otherwise.
///
/// Clones share the slot.
#[derive(Clone, Debug, Default)]
pub struct SessionCache {
    user: Arc<RwLock<Option<UserIdentity>>>,
}

impl SessionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached identity.
    pub fn set(&self, user: UserIdentity) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Reset to no identity.
    pub fn clear(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Snapshot of the current identity.
    #[must_use]
    pub fn current(&self) -> Option<UserIdentity> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
#[path = "session_cache_test.rs"]
mod tests;
