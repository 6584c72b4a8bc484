//! # rulequote-core: Pure Pricing Logic for RuleQuote
//!
//! This crate holds everything that decides what a quote costs: line items,
//! customer tiers, discount and tax rules, and the pricing engine that turns
//! them into totals. It performs no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RuleQuote Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rulequote CLI                                │   │
//! │  │         totals ──► quote ──► rules                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    rulequote-service                            │   │
//! │  │    config, rules store, quote + document services              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ rulequote-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │   rules   │  │   │
//! │  │   │ LineItem  │  │   Money   │  │ calculate │  │ Discount  │  │   │
//! │  │   │  Quote    │  │  rounding │  │  _totals  │  │  TaxRates │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Quote, DocumentJob, Rate, etc.)
//! - [`money`] - Money type and the one rounding rule
//! - [`rules`] - Discount thresholds and tax rates per tier
//! - [`pricing`] - The pricing engine
//! - [`render`] - Quote document rendering
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same items, tier and rules always give the same totals
//! 2. **No I/O**: rules are passed in, never read from a file here
//! 3. **Exact Arithmetic**: `Decimal` for intermediates, integer cents for output
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use rulequote_core::{calculate_totals, CustomerTier, LineItem, RulesConfig};
//! use rust_decimal::Decimal;
//!
//! let items = vec![LineItem::new("Widget", 3, Decimal::new(1000, 2))];
//! let totals = calculate_totals(&items, CustomerTier::Standard, &RulesConfig::default())?;
//!
//! // Below the $500 threshold: no discount, 10% tax
//! assert_eq!(totals.total.cents(), 3300);
//! # Ok::<(), rulequote_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod render;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{calculate_totals, TotalsResult};
pub use render::render_quote_html;
pub use rules::{DiscountRule, DiscountRules, RulesConfig, TaxRates};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items on a single quote.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum length of a customer name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a line-item description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;
