//! In-memory venue table.
//!
//! `VenueTable` is built once from the loader's output and never mutated
//! afterwards. The rows sit behind an `Arc<[Venue]>`, so cloning the table
//! into each Axum handler is a reference-count bump and no locking is
//! needed between concurrent readers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::venue::Venue;

/// Immutable, cheaply clonable table of venues in ascending id order.
#[derive(Debug, Clone)]
pub struct VenueTable {
    venues: Arc<[Venue]>,
    loaded_at: DateTime<Utc>,
}

impl VenueTable {
    /// Freeze loaded rows into a table, stamping the load time.
    pub fn new(venues: Vec<Venue>) -> Self {
        Self::with_loaded_at(venues, Utc::now())
    }

    /// Like [`VenueTable::new`] with an explicit load time.
    pub fn with_loaded_at(venues: Vec<Venue>, loaded_at: DateTime<Utc>) -> Self {
        Self {
            venues: venues.into(),
            loaded_at,
        }
    }

    /// Every venue, ascending by id.
    pub fn all(&self) -> &[Venue] {
        &self.venues
    }

    /// Venues whose `type` equals `kind` exactly (case-sensitive), ascending by id.
    pub fn find_by_type(&self, kind: &str) -> Vec<&Venue> {
        self.venues.iter().filter(|v| v.kind == kind).collect()
    }

    /// When the table was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
