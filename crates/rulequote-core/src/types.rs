//! # Domain Types
//!
//! Core domain types used throughout RuleQuote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │    LineItem     │   │  DocumentJob    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  description    │   │  id (UUID)      │       │
//! │  │  customer_*     │──►│  quantity       │   │  quote_id (FK)  │       │
//! │  │  customer_type  │   │  unit_price     │   │  status         │       │
//! │  │  totals         │   └─────────────────┘   │  file_path      │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Rate       │   │  CustomerTier   │   │   JobStatus     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Decimal [0,1)  │   │  Standard       │   │  Pending        │       │
//! │  │  0.05 = 5%      │   │  Premium        │   │  Processing     │       │
//! │  └─────────────────┘   └─────────────────┘   │  Completed      │       │
//! │                                              │  Failed         │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Wire format is camelCase to match the web front-end.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A discount or tax rate expressed as a fraction in `[0, 1)`.
///
/// `0.05` is 5%. Rates are never rounded; only currency amounts are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(Decimal);

impl Rate {
    /// Zero rate.
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// Creates a rate from a fraction, rejecting values outside `[0, 1)`.
    ///
    /// ## Example
    /// ```rust
    /// use rulequote_core::Rate;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Rate::new(Decimal::new(5, 2)).is_ok());   // 0.05
    /// assert!(Rate::new(Decimal::ONE).is_err());         // 100% is not a rate
    /// assert!(Rate::new(Decimal::new(-1, 2)).is_err());
    /// ```
    pub fn new(value: Decimal) -> CoreResult<Self> {
        if value < Decimal::ZERO || value >= Decimal::ONE {
            return Err(CoreError::InvalidRate {
                value: value.to_string(),
            });
        }
        Ok(Rate(value))
    }

    /// Creates a rate from basis points (825 bps = 8.25%).
    pub fn from_bps(bps: u32) -> CoreResult<Self> {
        Rate::new(Decimal::new(i64::from(bps), 4))
    }

    /// Basis-point constructor for built-in defaults; `bps` must be below 10_000.
    pub(crate) fn from_bps_unchecked(bps: u32) -> Self {
        debug_assert!(bps < 10_000);
        Rate(Decimal::new(i64::from(bps), 4))
    }

    /// Returns the fraction.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::ZERO
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = CoreError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Rate::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

/// Shows the rate as a percentage without trailing zeros: `5%`, `8.25%`.
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

// =============================================================================
// Customer Tier
// =============================================================================

/// Customer classification selecting the discount rule and tax rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CustomerTier {
    /// Regular customers.
    #[default]
    Standard,
    /// Customers with negotiated pricing.
    Premium,
}

impl CustomerTier {
    /// Every tier, in display order.
    pub const ALL: [CustomerTier; 2] = [CustomerTier::Standard, CustomerTier::Premium];

    /// Wire name (`standard` / `premium`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Standard => "standard",
            CustomerTier::Premium => "premium",
        }
    }

    /// Capitalized name used at the start of explanation lines.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerTier::Standard => "Standard",
            CustomerTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(CustomerTier::Standard),
            "premium" => Ok(CustomerTier::Premium),
            _ => Err(ValidationError::NotAllowed {
                field: "customerType".to_string(),
                allowed: CustomerTier::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A priced line on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// What is being quoted.
    pub description: String,

    /// Number of units, must be > 0.
    pub quantity: i64,

    /// Price per unit, must be >= 0.
    #[ts(type = "string")]
    pub unit_price: Decimal,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Unrounded `quantity × unit_price`.
    pub fn extended_price(&self) -> CoreResult<Decimal> {
        Decimal::from(self.quantity)
            .checked_mul(self.unit_price)
            .ok_or(CoreError::AmountOverflow)
    }
}

// =============================================================================
// Quote Payloads
// =============================================================================

/// Payload for creating a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub customer_type: CustomerTier,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,
}

/// Partial payload for updating a quote. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteUpdate {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_type: Option<CustomerTier>,
    pub items: Option<Vec<LineItem>>,
    pub notes: Option<String>,
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,
}

impl QuoteUpdate {
    /// Overlays the present fields onto `base`.
    pub fn apply(self, mut base: QuoteInput) -> QuoteInput {
        if let Some(name) = self.customer_name {
            base.customer_name = name;
        }
        if let Some(email) = self.customer_email {
            base.customer_email = email;
        }
        if let Some(tier) = self.customer_type {
            base.customer_type = tier;
        }
        if let Some(items) = self.items {
            base.items = items;
        }
        if self.notes.is_some() {
            base.notes = self.notes;
        }
        if self.valid_until.is_some() {
            base.valid_until = self.valid_until;
        }
        base
    }

    /// True when the patch changes something the totals depend on.
    pub fn affects_pricing(&self) -> bool {
        self.items.is_some() || self.customer_type.is_some()
    }
}

// =============================================================================
// Quote
// =============================================================================

/// Totals persisted on a quote at create/update time.
///
/// The explanation lines are deliberately not part of this record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub total: Money,
}

/// A stored quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_type: CustomerTier,
    pub items: Vec<LineItem>,
    pub notes: Option<String>,
    #[ts(as = "Option<String>")]
    pub valid_until: Option<DateTime<Utc>>,
    pub totals: QuoteTotals,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    /// Builds a quote from validated input and the totals computed for it.
    pub fn new(id: String, input: QuoteInput, totals: QuoteTotals, now: DateTime<Utc>) -> Self {
        Quote {
            id,
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            customer_type: input.customer_type,
            items: input.items,
            notes: input.notes,
            valid_until: input.valid_until,
            totals,
            created_at: now,
            updated_at: now,
        }
    }

    /// The editable part of the quote, as a create payload.
    pub fn to_input(&self) -> QuoteInput {
        QuoteInput {
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            customer_type: self.customer_type,
            items: self.items.clone(),
            notes: self.notes.clone(),
            valid_until: self.valid_until,
        }
    }

    /// Replaces the editable fields and totals, keeping id and creation time.
    pub fn revise(&mut self, input: QuoteInput, totals: QuoteTotals, now: DateTime<Utc>) {
        let created_at = self.created_at;
        *self = Quote::new(self.id.clone(), input, totals, created_at);
        self.updated_at = now;
    }
}

// =============================================================================
// Document Job
// =============================================================================

/// Status of a document-generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Created, not yet picked up.
    Pending,
    /// Rendering in progress.
    Processing,
    /// Document written; `file_path` is set.
    Completed,
    /// Rendering or writing failed; `error` is set.
    Failed,
}

impl JobStatus {
    /// Checks whether the lifecycle allows moving to `next`.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Processing)
                | (JobStatus::Processing, JobStatus::Completed)
                | (JobStatus::Processing, JobStatus::Failed)
        )
    }

    /// Completed and Failed jobs never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => write!(f, "pending"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A request to render one quote into a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DocumentJob {
    pub id: String,
    pub quote_id: String,
    pub status: JobStatus,
    pub file_path: Option<String>,
    pub error: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DocumentJob {
    /// Creates a pending job.
    pub fn new(id: String, quote_id: String, now: DateTime<Utc>) -> Self {
        DocumentJob {
            id,
            quote_id,
            status: JobStatus::Pending,
            file_path: None,
            error: None,
            created_at: now,
            completed_at: None,
        }
    }

    /// Pending → Processing.
    pub fn start(&mut self) -> CoreResult<()> {
        self.transition(JobStatus::Processing)
    }

    /// Processing → Completed.
    pub fn complete(&mut self, file_path: String, now: DateTime<Utc>) -> CoreResult<()> {
        self.transition(JobStatus::Completed)?;
        self.file_path = Some(file_path);
        self.completed_at = Some(now);
        Ok(())
    }

    /// Processing → Failed.
    pub fn fail(&mut self, error: impl Into<String>, now: DateTime<Utc>) -> CoreResult<()> {
        self.transition(JobStatus::Failed)?;
        self.error = Some(error.into());
        self.completed_at = Some(now);
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidJobTransition {
                job_id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
