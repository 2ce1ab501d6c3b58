use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::catalog::Product;

/// Immutable view of the catalog at one fetch. Rebuilt wholesale on every
/// refresh; filtered subsets are recomputed from it, never mutated in place.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub products: Vec<Product>,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn empty() -> Self {
        Self {
            generation: 0,
            products: Vec::new(),
            fetched_at: Utc::now(),
        }
    }
}

/// Shared holder for the current snapshot.
///
/// Refreshes take a generation number up front; a refresh that resolves after
/// a newer one has already installed its snapshot is discarded, so a delayed
/// fetch can never clobber fresher data (the original last-writer-wins slot
/// had exactly that race).
pub struct CatalogState {
    current: RwLock<Arc<CatalogSnapshot>>,
    next_generation: AtomicU64,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(CatalogSnapshot::empty())),
            next_generation: AtomicU64::new(1),
        }
    }

    /// Reserve a generation for a refresh that is about to start.
    pub fn begin_refresh(&self) -> u64 {
        self.next_generation.fetch_add(1, Ordering::SeqCst)
    }

    /// Install a freshly built product set, unless a newer generation is
    /// already in place. Returns the snapshot that is current afterwards.
    pub fn install(&self, generation: u64, products: Vec<Product>) -> Arc<CatalogSnapshot> {
        let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
        if generation <= slot.generation {
            tracing::debug!(
                stale = generation,
                current = slot.generation,
                "discarding stale refresh result"
            );
            return Arc::clone(&slot);
        }
        let snapshot = Arc::new(CatalogSnapshot {
            generation,
            products,
            fetched_at: Utc::now(),
        });
        *slot = Arc::clone(&snapshot);
        snapshot
    }

    /// Cheap handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }
}
