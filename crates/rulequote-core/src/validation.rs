//! # Validation Module
//!
//! Input validation for quote payloads and line items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Types, unknown customer tiers, out-of-range rates                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: validate_quote_input (THIS MODULE)                           │
//! │  ├── Required fields, email shape, item count                          │
//! │  └── Per-item description / quantity / unit price                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Re-checks quantity and unit price before computing                │
//! │                                                                         │
//! │  Every layer fails fast: the first failing check is reported.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rulequote_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_email("buyer@example.com").is_ok());
//! assert!(validate_quantity(0, "quantity").is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::rules::RulesConfig;
use crate::types::{CustomerTier, LineItem, QuoteInput};
use crate::{MAX_DESCRIPTION_LEN, MAX_LINE_ITEMS, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the customer name: non-empty after trimming, at most 200 chars.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customerName".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customerName".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates the customer email.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`, with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
///
/// ## Example
/// ```rust
/// use rulequote_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("ada@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "customerEmail".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "customerEmail".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@domain"));
    }

    let dotted = domain
        .find('.')
        .map(|i| i > 0 && !domain.ends_with('.'))
        .unwrap_or(false);
    if !dotted {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a line-item description.
pub fn validate_description(description: &str, field: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity: must be > 0.
pub fn validate_quantity(qty: i64, field: &str) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price: zero is allowed (free items), negatives are not.
///
/// ## Example
/// ```rust
/// use rulequote_core::validation::validate_unit_price;
/// use rust_decimal::Decimal;
///
/// assert!(validate_unit_price(Decimal::new(1099, 2), "unitPrice").is_ok());
/// assert!(validate_unit_price(Decimal::ZERO, "unitPrice").is_ok());
/// assert!(validate_unit_price(Decimal::new(-1, 0), "unitPrice").is_err());
/// ```
pub fn validate_unit_price(price: Decimal, field: &str) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Line Items
// =============================================================================

/// Checks the numeric fields of one item; this is what the pricing engine
/// enforces for itself.
pub fn validate_item_pricing(item: &LineItem, index: usize) -> ValidationResult<()> {
    validate_quantity(item.quantity, &format!("items[{}].quantity", index))?;
    validate_unit_price(item.unit_price, &format!("items[{}].unitPrice", index))
}

/// Validates one item fully (description included).
pub fn validate_line_item(item: &LineItem, index: usize) -> ValidationResult<()> {
    validate_description(&item.description, &format!("items[{}].description", index))?;
    validate_item_pricing(item, index)
}

/// Validates the item list of a quote.
///
/// ## Rules
/// - At least one item
/// - At most `MAX_LINE_ITEMS` (100)
/// - Every item valid
pub fn validate_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| validate_line_item(item, i))
}

// =============================================================================
// Quote Payload
// =============================================================================

/// Validates a complete create payload. The first failing check wins.
pub fn validate_quote_input(input: &QuoteInput) -> ValidationResult<()> {
    validate_customer_name(&input.customer_name)?;
    validate_email(&input.customer_email)?;
    validate_items(&input.items)
}

// =============================================================================
// Rules
// =============================================================================

/// Validates a rules configuration: every discount threshold must be >= 0.
///
/// Rates need no check here; `Rate` cannot hold an out-of-range value.
pub fn validate_rules(rules: &RulesConfig) -> ValidationResult<()> {
    for tier in CustomerTier::ALL {
        if rules.discounts.rule_for(tier).threshold < Decimal::ZERO {
            return Err(ValidationError::MustBeNonNegative {
                field: format!("discounts.{}.threshold", tier),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input_with(items: Vec<LineItem>) -> QuoteInput {
        QuoteInput {
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_type: CustomerTier::Standard,
            items,
            notes: None,
            valid_until: None,
        }
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Ada").is_ok());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("a.b+c@mail.example.org").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@@example.com").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada@.com").is_err());
        assert!(validate_email("ada@example.").is_err());
        assert!(validate_email("ada lovelace@example.com").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1, "quantity").is_ok());
        assert!(validate_quantity(10_000, "quantity").is_ok());
        assert!(validate_quantity(0, "quantity").is_err());
        assert!(validate_quantity(-1, "quantity").is_err());
    }

    #[test]
    fn test_validate_items() {
        assert!(validate_items(&[LineItem::new("Widget", 1, dec!(1))]).is_ok());

        let err = validate_items(&[]).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "items".to_string() });

        let too_many: Vec<LineItem> = (0..=MAX_LINE_ITEMS)
            .map(|i| LineItem::new(format!("Item {}", i), 1, dec!(1)))
            .collect();
        assert!(matches!(
            validate_items(&too_many),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_item_errors_name_the_index() {
        let items = vec![
            LineItem::new("Widget", 1, dec!(1)),
            LineItem::new("Gadget", 2, dec!(-0.01)),
        ];
        let err = validate_items(&items).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MustBeNonNegative {
                field: "items[1].unitPrice".to_string()
            }
        );

        let err = validate_line_item(&LineItem::new(" ", 1, dec!(1)), 3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Required {
                field: "items[3].description".to_string()
            }
        );
    }

    #[test]
    fn test_validate_quote_input_first_error_wins() {
        let mut input = input_with(vec![]);
        input.customer_email = "nope".to_string();
        // Email is checked before items
        assert!(matches!(
            validate_quote_input(&input),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let ok = input_with(vec![LineItem::new("Widget", 3, dec!(10.00))]);
        assert!(validate_quote_input(&ok).is_ok());
    }

    #[test]
    fn test_validate_rules() {
        let mut rules = RulesConfig::default();
        assert!(validate_rules(&rules).is_ok());

        // Zero threshold means "always discount", which is allowed
        rules.discounts.standard.threshold = Decimal::ZERO;
        assert!(validate_rules(&rules).is_ok());

        rules.discounts.standard.threshold = dec!(-0.01);
        assert_eq!(
            validate_rules(&rules).unwrap_err(),
            ValidationError::MustBeNonNegative {
                field: "discounts.standard.threshold".to_string()
            }
        );
    }
}
