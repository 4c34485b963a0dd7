//! In-memory caching using moka
//!
//! Holds recently used quotes. Status changes are applied to the cached
//! entry before the database write and marked pending; the write outcome
//! then either confirms the entry or rolls it back.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::quotes::models::{QuoteRecord, QuoteStatus};

/// Status change applied locally but not yet confirmed by the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatus {
    pub previous: String,
    pub requested: QuoteStatus,
}

/// Cached quote with its optional pending status change
#[derive(Debug, Clone)]
pub struct CachedQuote {
    pub record: QuoteRecord,
    pub pending: Option<PendingStatus>,
}

/// Application cache holding saved quotes
#[derive(Clone)]
pub struct AppCache {
    /// Quotes (id -> CachedQuote)
    pub quotes: Cache<Uuid, Arc<CachedQuote>>,
}

impl AppCache {
    /// Create a new cache instance with the given capacity and TTL
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            quotes: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .time_to_idle(ttl / 3)
                .build(),
        }
    }

    pub async fn get_quote(&self, id: Uuid) -> Option<Arc<CachedQuote>> {
        self.quotes.get(&id).await
    }

    /// Store an authoritative record, clearing any pending marker
    pub async fn insert_quote(&self, record: QuoteRecord) {
        let id = record.id;
        self.quotes
            .insert(id, Arc::new(CachedQuote { record, pending: None }))
            .await;
    }

    /// Speculatively set a quote's status.
    ///
    /// Returns `false` when the quote is not cached, in which case there is
    /// nothing to roll back later. Repeated pending changes keep the
    /// originally confirmed status as the rollback target.
    pub async fn apply_optimistic_status(&self, id: Uuid, status: QuoteStatus) -> bool {
        let Some(cached) = self.quotes.get(&id).await else {
            return false;
        };

        let previous = match &cached.pending {
            Some(pending) => pending.previous.clone(),
            None => cached.record.status.clone(),
        };

        let mut record = cached.record.clone();
        record.status = status.as_str().to_string();

        debug!("Optimistic status {} -> {} for quote {}", previous, status, id);
        self.quotes
            .insert(
                id,
                Arc::new(CachedQuote {
                    record,
                    pending: Some(PendingStatus {
                        previous,
                        requested: status,
                    }),
                }),
            )
            .await;
        true
    }

    /// Replace a pending entry with the record the database returned
    pub async fn confirm_quote(&self, record: QuoteRecord) {
        self.insert_quote(record).await;
    }

    /// Restore the last confirmed status of a pending entry
    pub async fn rollback_status(&self, id: Uuid) {
        let Some(cached) = self.quotes.get(&id).await else {
            return;
        };
        let Some(pending) = &cached.pending else {
            return;
        };

        warn!(
            "Rolling back status {} -> {} for quote {}",
            pending.requested, pending.previous, id
        );
        let mut record = cached.record.clone();
        record.status = pending.previous.clone();
        self.insert_quote(record).await;
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotes_size: self.quotes.entry_count(),
            pending_status_updates: self
                .quotes
                .iter()
                .filter(|(_, cached)| cached.pending.is_some())
                .count(),
        }
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(1000, Duration::from_secs(30 * 60))
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotes_size: u64,
    pub pending_status_updates: usize,
}
