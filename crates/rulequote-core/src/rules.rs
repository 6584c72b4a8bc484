//! # Pricing Rules
//!
//! The discount and tax policy the pricing engine applies.
//!
//! A `RulesConfig` is plain data: it is loaded once by the caller (see
//! `rulequote-service`), handed to [`crate::pricing::calculate_totals`]
//! explicitly, and never mutated in place afterwards.
//!
//! ## File Format
//! ```toml
//! [discounts]
//! enabled = true
//!
//! [discounts.standard]
//! threshold = 500
//! percentage = 0.05
//!
//! [discounts.premium]
//! threshold = 100
//! percentage = 0.10
//!
//! [tax_rates]
//! standard = 0.10
//! premium = 0.08
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::types::{CustomerTier, Rate};
use crate::validation::validate_rules;

/// Threshold + percentage pair for one tier.
///
/// The discount applies when the unrounded subtotal is at least `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub threshold: Decimal,
    pub percentage: Rate,
}

/// Discount policy for every tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRules {
    /// Global switch; when false no tier gets a discount.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_standard_discount")]
    pub standard: DiscountRule,

    #[serde(default = "default_premium_discount")]
    pub premium: DiscountRule,
}

fn default_enabled() -> bool {
    true
}

fn default_standard_discount() -> DiscountRule {
    DiscountRule {
        threshold: Decimal::from(500),
        percentage: Rate::from_bps_unchecked(500),
    }
}

fn default_premium_discount() -> DiscountRule {
    DiscountRule {
        threshold: Decimal::from(100),
        percentage: Rate::from_bps_unchecked(1000),
    }
}

impl Default for DiscountRules {
    fn default() -> Self {
        DiscountRules {
            enabled: default_enabled(),
            standard: default_standard_discount(),
            premium: default_premium_discount(),
        }
    }
}

impl DiscountRules {
    /// The rule for a tier.
    pub fn rule_for(&self, tier: CustomerTier) -> &DiscountRule {
        match tier {
            CustomerTier::Standard => &self.standard,
            CustomerTier::Premium => &self.premium,
        }
    }
}

/// Tax rate per tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRates {
    #[serde(default = "default_standard_tax")]
    pub standard: Rate,

    #[serde(default = "default_premium_tax")]
    pub premium: Rate,
}

fn default_standard_tax() -> Rate {
    Rate::from_bps_unchecked(1000)
}

fn default_premium_tax() -> Rate {
    Rate::from_bps_unchecked(800)
}

impl Default for TaxRates {
    fn default() -> Self {
        TaxRates {
            standard: default_standard_tax(),
            premium: default_premium_tax(),
        }
    }
}

impl TaxRates {
    /// The tax rate for a tier.
    pub fn rate_for(&self, tier: CustomerTier) -> Rate {
        match tier {
            CustomerTier::Standard => self.standard,
            CustomerTier::Premium => self.premium,
        }
    }
}

/// Complete pricing policy.
///
/// ## Defaults
/// | Tier     | Threshold | Discount | Tax  |
/// |----------|-----------|----------|------|
/// | standard | 500       | 5%       | 10%  |
/// | premium  | 100       | 10%      | 8%   |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default)]
    pub discounts: DiscountRules,

    #[serde(default)]
    pub tax_rates: TaxRates,
}

impl RulesConfig {
    /// Checks the parts `Rate` cannot check by construction.
    ///
    /// See [`validate_rules`].
    pub fn validate(&self) -> CoreResult<()> {
        validate_rules(self)?;
        Ok(())
    }

    /// Returns a copy with the global discount switch set.
    pub fn with_discounts_enabled(mut self, enabled: bool) -> Self {
        self.discounts.enabled = enabled;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
