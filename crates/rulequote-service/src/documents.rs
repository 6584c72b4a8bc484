//! # Document Service
//!
//! Renders quotes into HTML documents through tracked jobs.
//!
//! ## Job Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  request(quote_id) ──► Pending                                         │
//! │                           │                                             │
//! │  process(job_id)          ▼                                             │
//! │                       Processing ──► render stored quote               │
//! │                           │          write quote-<quote>-<job>.html    │
//! │                  ┌────────┴────────┐                                    │
//! │                  ▼                 ▼                                    │
//! │              Completed          Failed                                  │
//! │              file_path          error message                           │
//! │                                                                         │
//! │  generate(quote_id) = request + process on a spawned task              │
//! │  Each job is processed once. Nothing is retried.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Documents always show the totals stored on the quote; this service never
//! calls the pricing engine.

use chrono::Utc;
use rulequote_core::{render_quote_html, DocumentJob};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::DocumentSettings;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{DocumentJobRepository, QuoteRepository};

/// Service for document jobs.
#[derive(Debug, Clone)]
pub struct DocumentService {
    quotes: QuoteRepository,
    jobs: DocumentJobRepository,
    output_dir: PathBuf,
}

impl DocumentService {
    /// Creates a new DocumentService.
    pub fn new(
        quotes: QuoteRepository,
        jobs: DocumentJobRepository,
        settings: &DocumentSettings,
    ) -> Self {
        DocumentService {
            quotes,
            jobs,
            output_dir: settings.output_dir.clone(),
        }
    }

    /// Directory documents are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Creates a pending job for an existing quote.
    pub async fn request(&self, quote_id: &str) -> ServiceResult<DocumentJob> {
        if self.quotes.get_by_id(quote_id).await.is_none() {
            return Err(ServiceError::quote_not_found(quote_id));
        }

        let job = DocumentJob::new(Uuid::new_v4().to_string(), quote_id.to_string(), Utc::now());
        self.jobs.insert(job.clone()).await;

        info!(job_id = %job.id, quote_id = %quote_id, "Document job requested");
        Ok(job)
    }

    /// Runs a pending job to completion.
    ///
    /// Render and write failures end the job as Failed and are not returned
    /// as errors; the job record carries the message. Errors are returned
    /// only for unknown jobs and jobs that are not Pending.
    pub async fn process(&self, job_id: &str) -> ServiceResult<DocumentJob> {
        let job = self.jobs.transition(job_id, |job| job.start()).await?;
        info!(job_id = %job.id, quote_id = %job.quote_id, "Document job started");

        match self.write_document(&job).await {
            Ok(path) => {
                let file_path = path.display().to_string();
                let job = self
                    .jobs
                    .transition(job_id, |job| job.complete(file_path, Utc::now()))
                    .await?;
                info!(job_id = %job.id, path = ?path, "Document job completed");
                Ok(job)
            }
            Err(err) => {
                let message = err.to_string();
                warn!(job_id = %job_id, error = %message, "Document job failed");
                self.jobs
                    .transition(job_id, |job| job.fail(message, Utc::now()))
                    .await
            }
        }
    }

    /// Requests a job and processes it on a background task.
    ///
    /// Returns the job as requested (Pending); poll [`DocumentService::get`]
    /// for the outcome.
    pub async fn generate(&self, quote_id: &str) -> ServiceResult<DocumentJob> {
        let job = self.request(quote_id).await?;

        let service = self.clone();
        let job_id = job.id.clone();
        tokio::spawn(async move {
            if let Err(e) = service.process(&job_id).await {
                error!(job_id = %job_id, error = %e, "Document job could not run");
            }
        });

        Ok(job)
    }

    /// Gets a job by ID.
    pub async fn get(&self, job_id: &str) -> ServiceResult<DocumentJob> {
        self.jobs
            .get_by_id(job_id)
            .await
            .ok_or_else(|| ServiceError::job_not_found(job_id))
    }

    /// Jobs for one quote, oldest first.
    pub async fn list_for_quote(&self, quote_id: &str) -> Vec<DocumentJob> {
        self.jobs.list_for_quote(quote_id).await
    }

    /// All jobs, oldest first.
    pub async fn list(&self) -> Vec<DocumentJob> {
        self.jobs.list().await
    }

    async fn write_document(&self, job: &DocumentJob) -> ServiceResult<PathBuf> {
        let quote = self
            .quotes
            .get_by_id(&job.quote_id)
            .await
            .ok_or_else(|| ServiceError::quote_not_found(&job.quote_id))?;

        let html = render_quote_html(&quote, Utc::now().date_naive());

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self
            .output_dir
            .join(format!("quote-{}-{}.html", quote.id, job.id));
        tokio::fs::write(&path, html).await?;

        Ok(path)
    }
}
