use log::{debug, info};
use rocksdb::Options as rdbOptions;
use rocksdb::{Direction, IteratorMode, DB};
use std::path::Path;

use super::error::{PersistenceError, PersistenceResult};
use super::models::StoredEvent;
use super::{closest_enclosing, EventStore};

const EVENT_PREFIX: &[u8] = b"event:";

/// Event store kept in a RocksDB database, one JSON record per event name
pub struct RocksEventStore {
    db: DB,
}

impl RocksEventStore {
    /// Open (or create) the database at `path`
    pub fn open(path: &Path) -> PersistenceResult<Self> {
        std::fs::create_dir_all(path)?;

        let mut options = rdbOptions::default();
        options.create_if_missing(true);

        let db = DB::open(&options, path)?;

        info!("Event store opened at {}", path.display());

        Ok(Self { db })
    }

    /// Look up a single event by name
    pub fn get(&self, name: &str) -> PersistenceResult<Option<StoredEvent>> {
        match self.db.get(event_key(name))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// All stored events, ordered by name
    pub fn events(&self) -> PersistenceResult<Vec<StoredEvent>> {
        let mut events = Vec::new();

        for item in self
            .db
            .iterator(IteratorMode::From(EVENT_PREFIX, Direction::Forward))
        {
            let (key, value) = item?;
            if !key.starts_with(EVENT_PREFIX) {
                break;
            }
            events.push(serde_json::from_slice(&value)?);
        }

        Ok(events)
    }

    fn put(&self, event: &StoredEvent) -> PersistenceResult<()> {
        self.db
            .put(event_key(&event.name), serde_json::to_vec(event)?)?;
        Ok(())
    }
}

impl EventStore for RocksEventStore {
    fn find_enclosing(&self, instant: i64, slack: i64) -> PersistenceResult<Option<StoredEvent>> {
        Ok(closest_enclosing(self.events()?, instant, slack))
    }

    fn widen(&mut self, name: &str, instant: i64) -> PersistenceResult<StoredEvent> {
        if name.trim().is_empty() {
            return Err(PersistenceError::InvalidName(name.to_string()));
        }

        let event = match self.get(name)? {
            Some(mut event) => {
                if event.widen(instant) {
                    debug!("Event '{}' now spans {}..{}", name, event.begin, event.end);
                }
                event
            }
            None => {
                info!("Recording new event '{}'", name);
                StoredEvent::new(name, instant)
            }
        };

        self.put(&event)?;
        Ok(event)
    }
}

fn event_key(name: &str) -> Vec<u8> {
    [EVENT_PREFIX.to_vec(), name.as_bytes().to_vec()].concat()
}
