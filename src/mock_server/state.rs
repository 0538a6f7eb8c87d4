//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Graph server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::models::{Event, Group, User};

/// An entity set served at the top level, such as `/groups`.
pub trait MockEntity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Entity set name as it appears in the URL.
    const SET: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
    fn store(state: &MockState) -> &BTreeMap<String, Self>;
    fn store_mut(state: &mut MockState) -> &mut BTreeMap<String, Self>;
}

impl MockEntity for Group {
    const SET: &'static str = "groups";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn store(state: &MockState) -> &BTreeMap<String, Self> {
        &state.groups
    }

    fn store_mut(state: &mut MockState) -> &mut BTreeMap<String, Self> {
        &mut state.groups
    }
}

impl MockEntity for User {
    const SET: &'static str = "users";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn store(state: &MockState) -> &BTreeMap<String, Self> {
        &state.users
    }

    fn store_mut(state: &mut MockState) -> &mut BTreeMap<String, Self> {
        &mut state.users
    }
}

/// Shared state for the mock server.
///
/// Entities are kept in ordered maps so listings are stable across runs.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Groups indexed by id.
    pub groups: BTreeMap<String, Group>,

    /// Users indexed by id.
    pub users: BTreeMap<String, User>,

    /// Calendar events indexed by owner (`groups/{id}` or `users/{id}`), then event id.
    pub events: HashMap<String, BTreeMap<String, Event>>,

    /// Optional bearer token. If set, requests must present it.
    pub required_token: Option<String>,

    /// Base URL of the running server, used for `@odata.nextLink`.
    pub base_url: String,

    next_id: u64,
}

fn owner_key(set: &str, owner_id: &str) -> String {
    format!("{set}/{owner_id}")
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a group to the state. Groups without an id get one assigned.
    pub fn with_group(mut self, group: Group) -> Self {
        self.insert(group);
        self
    }

    /// Add a user to the state.
    pub fn with_user(mut self, user: User) -> Self {
        self.insert(user);
        self
    }

    /// Add an event to a group calendar.
    pub fn with_group_event(mut self, group_id: &str, event: Event) -> Self {
        self.insert_event(Group::SET, group_id, event);
        self
    }

    /// Add an event to a user calendar.
    pub fn with_user_event(mut self, user_id: &str, event: Event) -> Self {
        self.insert_event(User::SET, user_id, event);
        self
    }

    /// Set the required bearer token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Generate an id in Graph's GUID format.
    pub fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-0000-0000-{:012x}", self.next_id)
    }

    pub fn get<T: MockEntity>(&self, id: &str) -> Option<&T> {
        T::store(self).get(id)
    }

    pub fn list<T: MockEntity>(&self) -> Vec<&T> {
        T::store(self).values().collect()
    }

    /// Store an entity, assigning an id if it has none, and return it.
    pub fn insert<T: MockEntity>(&mut self, mut entity: T) -> T {
        let id = match entity.id() {
            Some(id) => id.to_string(),
            None => {
                let id = self.next_id();
                entity.set_id(id.clone());
                id
            }
        };
        T::store_mut(self).insert(id, entity.clone());
        entity
    }

    /// Merge a JSON patch into an entity. Returns `None` if it does not exist.
    pub fn update<T: MockEntity>(&mut self, id: &str, patch: Value) -> Option<serde_json::Result<()>> {
        let current = T::store(self).get(id)?;
        let merged = merge(current, patch).and_then(|mut updated: T| {
            updated.set_id(id.to_string());
            T::store_mut(self).insert(id.to_string(), updated);
            Ok(())
        });
        Some(merged)
    }

    /// Remove an entity. Returns whether it existed.
    pub fn delete<T: MockEntity>(&mut self, id: &str) -> bool {
        let removed = T::store_mut(self).remove(id).is_some();
        if removed {
            self.events.remove(&owner_key(T::SET, id));
        }
        removed
    }

    /// Events of an owner, or `None` if the owner does not exist.
    pub fn events_of<T: MockEntity>(&self, owner_id: &str) -> Option<Vec<&Event>> {
        self.get::<T>(owner_id)?;
        Some(
            self.events
                .get(&owner_key(T::SET, owner_id))
                .map(|events| events.values().collect())
                .unwrap_or_default(),
        )
    }

    pub fn get_event(&self, set: &str, owner_id: &str, event_id: &str) -> Option<&Event> {
        self.events.get(&owner_key(set, owner_id))?.get(event_id)
    }

    /// Store an event for an owner, assigning an id if needed.
    pub fn insert_event(&mut self, set: &str, owner_id: &str, mut event: Event) -> Event {
        if event.id.is_none() {
            event.id = Some(self.next_id());
        }
        let id = event.id.clone().unwrap_or_default();
        self.events
            .entry(owner_key(set, owner_id))
            .or_default()
            .insert(id, event.clone());
        event
    }

    pub fn update_event(
        &mut self,
        set: &str,
        owner_id: &str,
        event_id: &str,
        patch: Value,
    ) -> Option<serde_json::Result<()>> {
        let events = self.events.get_mut(&owner_key(set, owner_id))?;
        let current = events.get(event_id)?;
        Some(merge(current, patch).map(|mut updated: Event| {
            updated.id = Some(event_id.to_string());
            events.insert(event_id.to_string(), updated);
        }))
    }

    pub fn delete_event(&mut self, set: &str, owner_id: &str, event_id: &str) -> bool {
        self.events
            .get_mut(&owner_key(set, owner_id))
            .and_then(|events| events.remove(event_id))
            .is_some()
    }
}

/// Apply a JSON merge patch (top-level keys replace, `null` removes).
fn merge<T: Serialize + DeserializeOwned>(entity: &T, patch: Value) -> serde_json::Result<T> {
    let mut current = serde_json::to_value(entity)?;
    if let (Value::Object(target), Value::Object(changes)) = (&mut current, patch) {
        for (key, value) in changes {
            if value.is_null() {
                target.remove(&key);
            } else {
                target.insert(key, value);
            }
        }
    }
    serde_json::from_value(current)
}
