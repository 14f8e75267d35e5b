//! Events remembered across runs.
//!
//! The tracker works without any of this. When a store is configured, a
//! picture whose time falls inside a known event's range (give or take some
//! slack) gets that event suggested, which lets pictures from someone else's
//! camera join an event sorted weeks ago.

mod db;
mod error;
mod models;


use std::collections::BTreeMap;

pub use db::RocksEventStore;
pub use error::{PersistenceError, PersistenceResult};
pub use models::StoredEvent;

/// Durable lookup and widening of named event ranges
pub trait EventStore {
    /// The event whose range, grown by `slack` seconds, contains `instant`.
    ///
    /// When several match, the one with the narrowest range wins.
    fn find_enclosing(&self, instant: i64, slack: i64) -> PersistenceResult<Option<StoredEvent>>;

    /// Grow the named event to include `instant`, creating it if needed
    fn widen(&mut self, name: &str, instant: i64) -> PersistenceResult<StoredEvent>;
}

/// Event store that lives for one process
#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: BTreeMap<String, StoredEvent>,
}

impl MemoryEventStore {
    pub fn insert(&mut self, event: StoredEvent) {
        self.events.insert(event.name.clone(), event);
    }

    pub fn get(&self, name: &str) -> Option<&StoredEvent> {
        self.events.get(name)
    }
}

impl EventStore for MemoryEventStore {
    fn find_enclosing(&self, instant: i64, slack: i64) -> PersistenceResult<Option<StoredEvent>> {
        Ok(closest_enclosing(
            self.events.values().cloned(),
            instant,
            slack,
        ))
    }

    fn widen(&mut self, name: &str, instant: i64) -> PersistenceResult<StoredEvent> {
        if name.trim().is_empty() {
            return Err(PersistenceError::InvalidName(name.to_string()));
        }

        let event = self
            .events
            .entry(name.to_string())
            .and_modify(|event| {
                event.widen(instant);
            })
            .or_insert_with(|| StoredEvent::new(name, instant));

        Ok(event.clone())
    }
}

/// Narrowest event enclosing `instant`, ties broken by name
fn closest_enclosing(
    events: impl IntoIterator<Item = StoredEvent>,
    instant: i64,
    slack: i64,
) -> Option<StoredEvent> {
    events
        .into_iter()
        .filter(|event| event.encloses(instant, slack))
        .min_by(|a, b| a.span().cmp(&b.span()).then_with(|| a.name.cmp(&b.name)))
}
