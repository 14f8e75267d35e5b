use serde::{Deserialize, Serialize};

/// An event remembered across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// Event name as confirmed by the operator
    pub name: String,

    /// Earliest picture seen (unix timestamp)
    pub begin: i64,

    /// Latest picture seen (unix timestamp)
    pub end: i64,
}

impl StoredEvent {
    /// A new event covering a single instant
    pub fn new(name: impl Into<String>, instant: i64) -> Self {
        Self {
            name: name.into(),
            begin: instant,
            end: instant,
        }
    }

    /// Grow the range to include `instant`; never shrinks
    pub fn widen(&mut self, instant: i64) -> bool {
        let (begin, end) = (self.begin.min(instant), self.end.max(instant));
        let changed = begin != self.begin || end != self.end;
        self.begin = begin;
        self.end = end;
        changed
    }

    /// Whether `instant` lies in the range grown by `slack` seconds on each side
    pub fn encloses(&self, instant: i64, slack: i64) -> bool {
        self.begin.saturating_sub(slack) <= instant && instant <= self.end.saturating_add(slack)
    }

    pub fn span(&self) -> i64 {
        self.end - self.begin
    }
}
