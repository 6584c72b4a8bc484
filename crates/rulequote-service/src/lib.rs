//! # rulequote-service: Quote Lifecycle for RuleQuote
//!
//! Wraps the pure pricing core with configuration, shared rules, storage
//! and document generation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ServiceConfig::load()                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                rulequote-service (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────┐   ┌──────────────┐   ┌────────────────────┐ │   │
//! │  │   │ RulesStore   │──►│ QuoteService │   │  DocumentService   │ │   │
//! │  │   │ Arc snapshot │   │ create/update│   │  request/process   │ │   │
//! │  │   └──────────────┘   └──────┬───────┘   └─────────┬──────────┘ │   │
//! │  │                             │                     │            │   │
//! │  │                      ┌──────▼─────────────────────▼─────┐      │   │
//! │  │                      │  QuoteRepository / JobRepository │      │   │
//! │  │                      └──────────────────────────────────┘      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rulequote-core (pricing, validation, rendering)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rulequote_service::{ServiceConfig, Services};
//!
//! let config = ServiceConfig::load(None)?;
//! let services = Services::from_config(&config)?;
//!
//! let quote = services.quotes.create(input).await?;
//! let job = services.documents.generate(&quote.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod documents;
pub mod error;
pub mod quotes;
pub mod repository;
pub mod rules_store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DocumentSettings, QuoteSettings, ServiceConfig};
pub use documents::DocumentService;
pub use error::{ServiceError, ServiceResult};
pub use quotes::QuoteService;
pub use repository::{DocumentJobRepository, QuoteRepository};
pub use rules_store::RulesStore;

use std::sync::Arc;

/// All services wired to shared storage and one rules store.
#[derive(Debug, Clone)]
pub struct Services {
    pub rules: Arc<RulesStore>,
    pub quotes: QuoteService,
    pub documents: DocumentService,
}

impl Services {
    /// Builds the services from a configuration, validating it first.
    pub fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        config.validate()?;

        let rules = Arc::new(RulesStore::new(config.rules.clone())?);
        let quote_repo = QuoteRepository::new();

        let quotes = QuoteService::new(quote_repo.clone(), Arc::clone(&rules), &config.quotes);
        let documents =
            DocumentService::new(quote_repo, DocumentJobRepository::new(), &config.documents);

        Ok(Services {
            rules,
            quotes,
            documents,
        })
    }
}
