//! Shared pieces of the storage boundary.
//!
//! Each aggregate declares its own repository trait next to its domain types;
//! the binary wires in-memory adapters, while a hosted database adapter would
//! implement the same traits.

use std::sync::atomic::{AtomicU64, Ordering};

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Monotonic, process-wide id source rendering ids such as `calc-000001`.
pub struct IdSequence {
    prefix: &'static str,
    next: AtomicU64,
}

impl IdSequence {
    pub const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{id:06}", self.prefix)
    }
}
