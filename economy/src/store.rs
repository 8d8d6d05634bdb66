//! Profile storage contract and the in-memory implementation

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::profile::Profile;

/// Errors surfaced by store implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("profile not found: {0}")]
    NotFound(String),

    #[error("condition failed for profile {0}")]
    ConditionFailed(String),

    #[error("profile store lock was poisoned")]
    LockPoisoned,

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Single-record profile storage
///
/// Implementations must apply `update_if` atomically: the condition is checked
/// and the mutation applied without another writer in between.
pub trait ProfileStore: Send + Sync {
    /// Load a profile by user id
    fn get(&self, user_id: &str) -> Result<Option<Profile>>;

    /// Insert unless a profile with the same user id exists
    ///
    /// Returns `true` when the profile was created.
    fn insert_if_absent(&self, profile: Profile) -> Result<bool>;

    /// Apply `mutation` only if `condition` holds, returning the updated profile
    fn update_if(
        &self,
        user_id: &str,
        condition: &dyn Fn(&Profile) -> bool,
        mutation: &mut dyn FnMut(&mut Profile),
    ) -> Result<Profile>;

    /// Check if a profile exists
    fn exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.get(user_id)?.is_some())
    }
}

/// In-memory implementation of [`ProfileStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize> {
        let profiles = self.profiles.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(profiles.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<Profile>> {
        let profiles = self.profiles.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(profiles.get(user_id).cloned())
    }

    fn insert_if_absent(&self, profile: Profile) -> Result<bool> {
        let mut profiles = self.profiles.write().map_err(|_| StoreError::LockPoisoned)?;
        if profiles.contains_key(&profile.user_id) {
            return Ok(false);
        }
        profiles.insert(profile.user_id.clone(), profile);
        Ok(true)
    }

    fn update_if(
        &self,
        user_id: &str,
        condition: &dyn Fn(&Profile) -> bool,
        mutation: &mut dyn FnMut(&mut Profile),
    ) -> Result<Profile> {
        let mut profiles = self.profiles.write().map_err(|_| StoreError::LockPoisoned)?;
        let profile = profiles
            .get_mut(user_id)
            .ok_or_else(|| StoreError::NotFound(user_id.to_string()))?;

        if !condition(profile) {
            return Err(StoreError::ConditionFailed(user_id.to_string()));
        }

        mutation(profile);
        Ok(profile.clone())
    }
}
