//! # Document Job Repository
//!
//! Storage for document-generation jobs.
//!
//! Status changes go through [`DocumentJobRepository::transition`], which
//! applies the change under the write lock. Two callers racing to start the
//! same job cannot both succeed.

use rulequote_core::{CoreResult, DocumentJob};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ServiceError, ServiceResult};

/// Repository for document jobs.
#[derive(Debug, Clone, Default)]
pub struct DocumentJobRepository {
    jobs: Arc<RwLock<HashMap<String, DocumentJob>>>,
}

impl DocumentJobRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a job by ID.
    pub async fn get_by_id(&self, id: &str) -> Option<DocumentJob> {
        self.jobs.read().await.get(id).cloned()
    }

    /// Inserts a new job.
    pub async fn insert(&self, job: DocumentJob) {
        debug!(id = %job.id, quote_id = %job.quote_id, "Inserting document job");
        self.jobs.write().await.insert(job.id.clone(), job);
    }

    /// Applies `change` to the stored job atomically and returns the result.
    ///
    /// If `change` fails the stored job is left as it was.
    pub async fn transition<F>(&self, id: &str, change: F) -> ServiceResult<DocumentJob>
    where
        F: FnOnce(&mut DocumentJob) -> CoreResult<()>,
    {
        let mut jobs = self.jobs.write().await;
        let stored = jobs
            .get_mut(id)
            .ok_or_else(|| ServiceError::job_not_found(id))?;

        let mut next = stored.clone();
        change(&mut next)?;
        debug!(id = %id, status = %next.status, "Document job status changed");
        *stored = next.clone();
        Ok(next)
    }

    /// Jobs for one quote, oldest first.
    pub async fn list_for_quote(&self, quote_id: &str) -> Vec<DocumentJob> {
        let mut jobs: Vec<DocumentJob> = self
            .jobs
            .read()
            .await
            .values()
            .filter(|job| job.quote_id == quote_id)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        jobs
    }

    /// All jobs, oldest first.
    pub async fn list(&self) -> Vec<DocumentJob> {
        let mut jobs: Vec<DocumentJob> = self.jobs.read().await.values().cloned().collect();
        jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        jobs
    }
}
