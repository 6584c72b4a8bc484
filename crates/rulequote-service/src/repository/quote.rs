//! # Quote Repository
//!
//! Storage for quotes, keyed by id.
//!
//! Edits go through [`QuoteRepository::modify`], which reads, changes and
//! writes back under one write lock, so concurrent patches never overwrite
//! each other.

use rulequote_core::Quote;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};

/// Repository for quotes.
#[derive(Debug, Clone, Default)]
pub struct QuoteRepository {
    quotes: Arc<RwLock<HashMap<String, Quote>>>,
}

impl QuoteRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a quote by ID.
    pub async fn get_by_id(&self, id: &str) -> Option<Quote> {
        self.quotes.read().await.get(id).cloned()
    }

    /// Inserts a new quote, replacing any record with the same id.
    pub async fn insert(&self, quote: Quote) {
        debug!(id = %quote.id, "Inserting quote");
        self.quotes.write().await.insert(quote.id.clone(), quote);
    }

    /// Applies `change` to the stored quote atomically and returns the result.
    ///
    /// If `change` fails the stored quote is left as it was.
    pub async fn modify<F>(&self, id: &str, change: F) -> ServiceResult<Quote>
    where
        F: FnOnce(&mut Quote) -> ServiceResult<()>,
    {
        let mut quotes = self.quotes.write().await;
        let stored = quotes
            .get_mut(id)
            .ok_or_else(|| ServiceError::quote_not_found(id))?;

        let mut next = stored.clone();
        change(&mut next)?;
        debug!(id = %id, "Updating quote");
        *stored = next.clone();
        Ok(next)
    }

    /// Removes a quote. Returns false if it did not exist.
    pub async fn delete(&self, id: &str) -> bool {
        self.quotes.write().await.remove(id).is_some()
    }

    /// All quotes, newest first.
    pub async fn list(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self.quotes.read().await.values().cloned().collect();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        quotes
    }
}
