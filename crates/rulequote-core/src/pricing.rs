//! # Pricing Engine
//!
//! Computes subtotal, discount, tax and total for a set of line items.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_totals(items, tier, rules)                 │
//! │                                                                         │
//! │  1. subtotal     = Σ quantity × unit_price              (unrounded)    │
//! │  2. rate         = rule(tier).percentage                               │
//! │                    if enabled && subtotal >= threshold, else 0         │
//! │  3. discount     = subtotal × rate                                     │
//! │  4. taxable base = subtotal − discount                                 │
//! │  5. tax          = taxable base × tax_rate(tier)                       │
//! │  6. total        = taxable base + tax                                  │
//! │  7. round subtotal / discount / tax / total independently (half-up)    │
//! │  8. explanation lines                                                  │
//! │                                                                         │
//! │  Discount always reduces the tax base, never the other way round.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is pure: no I/O, no clock, no logging, no shared state. The
//! rules are passed in by the caller.
//!
//! ## Example
//! ```rust
//! use rulequote_core::pricing::calculate_totals;
//! use rulequote_core::{CustomerTier, LineItem, RulesConfig};
//! use rust_decimal::Decimal;
//!
//! let items = vec![LineItem::new("Bulk", 60, Decimal::new(1000, 2))];
//! let totals = calculate_totals(&items, CustomerTier::Standard, &RulesConfig::default()).unwrap();
//!
//! assert_eq!(totals.subtotal.to_string(), "$600.00");
//! assert_eq!(totals.discount.to_string(), "$30.00");
//! assert_eq!(totals.tax.to_string(), "$57.00");
//! assert_eq!(totals.total.to_string(), "$627.00");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{round_currency, Money};
use crate::rules::RulesConfig;
use crate::types::{CustomerTier, LineItem, QuoteTotals, Rate};
use crate::validation::validate_item_pricing;

/// Result of one pricing run. Never stored as a whole; see [`QuoteTotals`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResult {
    pub subtotal: Money,

    /// Rate actually applied; zero when disabled or below threshold.
    #[ts(type = "string")]
    pub discount_percentage: Rate,

    pub discount: Money,

    /// Rate the tax was computed with.
    #[ts(type = "string")]
    pub tax_rate: Rate,

    pub tax: Money,

    pub total: Money,

    /// Number of line items priced.
    pub item_count: usize,

    /// Human-readable steps, for display only.
    pub explanation: Vec<String>,
}

impl TotalsResult {
    /// The persisted projection of this result.
    pub fn totals(&self) -> QuoteTotals {
        QuoteTotals {
            subtotal: self.subtotal,
            discount: self.discount,
            tax: self.tax,
            total: self.total,
        }
    }
}

impl From<&TotalsResult> for QuoteTotals {
    fn from(result: &TotalsResult) -> Self {
        result.totals()
    }
}

/// Prices `items` for `tier` under `rules`.
///
/// An empty slice is priced as all zeros without error, so callers can show
/// previews of incomplete quotes.
///
/// ## Errors
/// - [`CoreError::InvalidInput`] when an item has quantity ≤ 0 or a negative
///   unit price; nothing is computed in that case
/// - [`CoreError::AmountOverflow`] when an amount leaves the decimal range
pub fn calculate_totals(
    items: &[LineItem],
    tier: CustomerTier,
    rules: &RulesConfig,
) -> CoreResult<TotalsResult> {
    for (index, item) in items.iter().enumerate() {
        validate_item_pricing(item, index)?;
    }

    let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.extended_price()?)
            .ok_or(CoreError::AmountOverflow)
    })?;

    let mut explanation = Vec::with_capacity(4);
    explanation.push(format!(
        "Subtotal: {} ({})",
        Money::from_decimal(subtotal)?,
        item_count_label(items.len())
    ));

    if items.is_empty() {
        explanation.push("No discount applied (no line items)".to_string());
        explanation.push("No tax applied (no line items)".to_string());
        explanation.push(format!("Total: {}", Money::zero()));
        return Ok(TotalsResult {
            subtotal: Money::zero(),
            discount_percentage: Rate::ZERO,
            discount: Money::zero(),
            tax_rate: Rate::ZERO,
            tax: Money::zero(),
            total: Money::zero(),
            item_count: 0,
            explanation,
        });
    }

    let rule = rules.discounts.rule_for(tier);
    let discount_percentage = if !rules.discounts.enabled {
        explanation.push("No discount applied (discounts are disabled)".to_string());
        Rate::ZERO
    } else if subtotal >= rule.threshold {
        explanation.push(format!(
            "{} customer discount: {} (applied for orders of {} or more)",
            tier.label(),
            rule.percentage,
            format_threshold(rule.threshold)
        ));
        rule.percentage
    } else {
        explanation.push(format!(
            "No discount applied (minimum {} required for {} customers)",
            format_threshold(rule.threshold),
            tier
        ));
        Rate::ZERO
    };

    let discount = checked_mul(subtotal, discount_percentage.value())?;
    // discount <= subtotal because the rate is below 1
    let taxable_base = subtotal - discount;

    let tax_rate = rules.tax_rates.rate_for(tier);
    let tax = checked_mul(taxable_base, tax_rate.value())?;
    let total = taxable_base
        .checked_add(tax)
        .ok_or(CoreError::AmountOverflow)?;

    let subtotal = Money::from_decimal(subtotal)?;
    let discount = Money::from_decimal(discount)?;
    let tax = Money::from_decimal(tax)?;
    let total = Money::from_decimal(total)?;

    explanation.push(format!("Tax ({} for {} customers): {}", tax_rate, tier, tax));
    explanation.push(format!("Total: {}", total));

    Ok(TotalsResult {
        subtotal,
        discount_percentage,
        discount,
        tax_rate,
        tax,
        total,
        item_count: items.len(),
        explanation,
    })
}

fn checked_mul(amount: Decimal, rate: Decimal) -> CoreResult<Decimal> {
    amount.checked_mul(rate).ok_or(CoreError::AmountOverflow)
}

fn format_threshold(threshold: Decimal) -> String {
    format!("${:.2}", round_currency(threshold))
}

fn item_count_label(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{} items", count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
