//! Process-wide map from opponent to their game session.

#![cfg(feature = "std")]

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::engine::{DispatchError, GameSession, SessionError};

/// A session shared between tasks. Holding the lock serialises every command
/// for that opponent.
pub type SharedSession = Arc<tokio::sync::Mutex<GameSession>>;

/// Opponent id → session. The map lock is only held for lookups and
/// inserts, never across an `.await`.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, SharedSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up the session for `opponent_id`.
    pub fn get(&self, opponent_id: &str) -> Option<SharedSession> {
        self.sessions().get(opponent_id).cloned()
    }

    /// Insert a session built by `make`, unless one already exists.
    /// `make` only runs when the slot looked free, and runs without the map
    /// lock held. If another task filled the slot meanwhile, the new session
    /// is dropped and `AlreadyInProgress` is returned.
    pub fn create<F>(&self, opponent_id: &str, make: F) -> Result<SharedSession, DispatchError>
    where
        F: FnOnce() -> Result<GameSession, SessionError>,
    {
        if self.sessions().contains_key(opponent_id) {
            return Err(DispatchError::AlreadyInProgress);
        }
        let session = Arc::new(tokio::sync::Mutex::new(make()?));
        match self.sessions().entry(opponent_id.to_string()) {
            Entry::Occupied(_) => Err(DispatchError::AlreadyInProgress),
            Entry::Vacant(entry) => Ok(entry.insert(session).clone()),
        }
    }

    /// Return the existing session, or insert one built by `make`. The flag is
    /// `true` when a new session was created. As with `create`, `make` runs
    /// outside the map lock; a session inserted meanwhile wins.
    pub fn get_or_create<F>(
        &self,
        opponent_id: &str,
        make: F,
    ) -> Result<(SharedSession, bool), SessionError>
    where
        F: FnOnce() -> Result<GameSession, SessionError>,
    {
        if let Some(session) = self.get(opponent_id) {
            return Ok((session, false));
        }
        let session = Arc::new(tokio::sync::Mutex::new(make()?));
        match self.sessions().entry(opponent_id.to_string()) {
            Entry::Occupied(entry) => Ok((entry.get().clone(), false)),
            Entry::Vacant(entry) => Ok((entry.insert(session).clone(), true)),
        }
    }

    /// Drop the session for `opponent_id`, returning it if present. Tasks
    /// already holding the session keep their handle.
    pub fn remove(&self, opponent_id: &str) -> Option<SharedSession> {
        self.sessions().remove(opponent_id)
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions().is_empty()
    }

    /// Ids of every opponent with a session, sorted.
    pub fn opponents(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sessions().keys().cloned().collect();
        ids.sort();
        ids
    }
}
