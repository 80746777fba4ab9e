use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Identifier of a row or column inside one document tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(pub u64);

impl Id {
    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn key(self) -> String {
        self.0.to_string()
    }

    pub fn parse_key(key: &str) -> Option<Self> {
        key.trim().parse().ok().map(Id)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Id(value)
    }
}

/// Monotonic id source. Ids start at the wall clock in milliseconds so they
/// stay above ids written by earlier sessions, then only ever count up.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn from_clock() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(1);
        Self::starting_at(millis.max(1))
    }

    pub fn next_id(&self) -> Id {
        Id(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Makes sure every later id is strictly greater than `id`.
    pub fn observe(&self, id: Id) {
        self.next
            .fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}

fn session() -> &'static IdGenerator {
    static SESSION: OnceLock<IdGenerator> = OnceLock::new();
    SESSION.get_or_init(IdGenerator::from_clock)
}

/// Next id from the session-wide generator.
pub fn next_id() -> Id {
    session().next_id()
}

pub fn observe(id: Id) {
    session().observe(id);
}
