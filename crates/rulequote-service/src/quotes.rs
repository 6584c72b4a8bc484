//! # Quote Service
//!
//! Quote lifecycle: create, update, read, delete, and previews.
//!
//! ## Create / Update Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  QuoteInput / QuoteUpdate                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_quote_input ──► error: nothing stored                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rules.snapshot() ──► calculate_totals(items, tier, &rules)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Quote { totals: QuoteTotals }  (explanation is not stored)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  QuoteRepository                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are recomputed on every update with the rules in effect at that
//! moment; reading a quote never reprices it.

use chrono::{Duration, Utc};
use rulequote_core::validation::validate_quote_input;
use rulequote_core::{
    calculate_totals, CustomerTier, LineItem, Money, Quote, QuoteInput, QuoteUpdate,
    TotalsResult,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::QuoteSettings;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::QuoteRepository;
use crate::rules_store::RulesStore;

/// Service for the quote lifecycle.
#[derive(Debug, Clone)]
pub struct QuoteService {
    repo: QuoteRepository,
    rules: Arc<RulesStore>,
    default_valid_days: u32,
}

impl QuoteService {
    /// Creates a new QuoteService.
    pub fn new(repo: QuoteRepository, rules: Arc<RulesStore>, settings: &QuoteSettings) -> Self {
        QuoteService {
            repo,
            rules,
            default_valid_days: settings.default_valid_days,
        }
    }

    /// Validates, prices and stores a new quote.
    ///
    /// `valid_until` defaults to now + `default_valid_days` when absent.
    pub async fn create(&self, input: QuoteInput) -> ServiceResult<Quote> {
        let mut input = normalize(input);
        validate_quote_input(&input)?;

        let rules = self.rules.snapshot();
        let result = calculate_totals(&input.items, input.customer_type, &rules)?;

        let now = Utc::now();
        if input.valid_until.is_none() {
            let valid_until = now
                .checked_add_signed(Duration::days(i64::from(self.default_valid_days)))
                .ok_or_else(|| {
                    ServiceError::Config(format!(
                        "quotes.default_valid_days out of range: {}",
                        self.default_valid_days
                    ))
                })?;
            input.valid_until = Some(valid_until);
        }

        let quote = Quote::new(Uuid::new_v4().to_string(), input, result.totals(), now);
        self.repo.insert(quote.clone()).await;

        info!(
            quote_id = %quote.id,
            tier = %quote.customer_type,
            items = quote.items.len(),
            total = %quote.totals.total,
            "Quote created"
        );
        Ok(quote)
    }

    /// Merges `patch` into a stored quote, revalidates and reprices it.
    ///
    /// The merge runs under the repository write lock, so a concurrent
    /// update of the same quote sees this one's result.
    pub async fn update(&self, id: &str, patch: QuoteUpdate) -> ServiceResult<Quote> {
        let pricing_fields_changed = patch.affects_pricing();
        let rules = self.rules.snapshot();
        let mut previous_total = Money::zero();

        let quote = self
            .repo
            .modify(id, |quote| {
                let merged = normalize(patch.apply(quote.to_input()));
                validate_quote_input(&merged)?;

                let result = calculate_totals(&merged.items, merged.customer_type, &rules)?;
                previous_total = quote.totals.total;
                quote.revise(merged, result.totals(), Utc::now());
                Ok(())
            })
            .await?;

        info!(
            quote_id = %quote.id,
            pricing_fields_changed,
            previous_total = %previous_total,
            total = %quote.totals.total,
            "Quote updated"
        );
        Ok(quote)
    }

    /// Gets a quote by ID.
    pub async fn get(&self, id: &str) -> ServiceResult<Quote> {
        self.repo
            .get_by_id(id)
            .await
            .ok_or_else(|| ServiceError::quote_not_found(id))
    }

    /// All quotes, newest first.
    pub async fn list(&self) -> Vec<Quote> {
        self.repo.list().await
    }

    /// Deletes a quote.
    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        if !self.repo.delete(id).await {
            return Err(ServiceError::quote_not_found(id));
        }
        info!(quote_id = %id, "Quote deleted");
        Ok(())
    }

    /// Prices items with the current rules without storing anything.
    ///
    /// Empty items are allowed and price to zero.
    pub fn preview(&self, items: &[LineItem], tier: CustomerTier) -> ServiceResult<TotalsResult> {
        let rules = self.rules.snapshot();
        let result = calculate_totals(items, tier, &rules)?;
        debug!(items = items.len(), %tier, total = %result.total, "Totals preview");
        Ok(result)
    }
}

/// Trims customer-entered identity fields.
fn normalize(mut input: QuoteInput) -> QuoteInput {
    input.customer_name = input.customer_name.trim().to_string();
    input.customer_email = input.customer_email.trim().to_string();
    input
}
