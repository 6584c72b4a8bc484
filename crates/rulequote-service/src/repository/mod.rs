//! # Repository Module
//!
//! In-memory storage for quotes and document jobs.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  QuoteService / DocumentService                                        │
//! │       │                                                                 │
//! │       │  repo.get_by_id("…")                                           │
//! │       ▼                                                                 │
//! │  QuoteRepository / DocumentJobRepository                               │
//! │  ├── insert / update / delete                                          │
//! │  ├── get_by_id                                                         │
//! │  └── list                                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<tokio::sync::RwLock<HashMap<id, record>>>                         │
//! │                                                                         │
//! │  Clones share the same map, so every service sees the same records.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`QuoteRepository`] - Quote CRUD
//! - [`DocumentJobRepository`] - Document job records and status changes

pub mod document_job;
pub mod quote;

pub use document_job::DocumentJobRepository;
pub use quote::QuoteRepository;
