//! Property-based tests for the pricing engine.
//!
//! Prices are generated in whole cents so the expected values can be
//! computed independently with plain `Decimal` arithmetic.

use proptest::prelude::*;
use rulequote_core::money::round_currency;
use rulequote_core::{calculate_totals, CustomerTier, LineItem, Money, Rate, RulesConfig};
use rust_decimal::Decimal;

fn item_strategy() -> impl Strategy<Value = LineItem> {
    (1i64..50, 0i64..100_000).prop_map(|(quantity, cents)| {
        LineItem::new("Generated", quantity, Decimal::new(cents, 2))
    })
}

fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(item_strategy(), 0..10)
}

fn tier_strategy() -> impl Strategy<Value = CustomerTier> {
    prop_oneof![Just(CustomerTier::Standard), Just(CustomerTier::Premium)]
}

fn exact_subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(|i| Decimal::from(i.quantity) * i.unit_price)
        .sum()
}

fn cents(amount: Decimal) -> i64 {
    Money::from_decimal(amount).unwrap().cents()
}

proptest! {
    /// Property: subtotal is the exact sum of quantity × unit price
    #[test]
    fn test_subtotal_is_sum_of_lines(items in items_strategy(), tier in tier_strategy()) {
        let result = calculate_totals(&items, tier, &RulesConfig::default()).unwrap();
        prop_assert_eq!(result.subtotal.cents(), cents(exact_subtotal(&items)));
        prop_assert_eq!(result.item_count, items.len());
    }

    /// Property: discount applies exactly when enabled and subtotal >= threshold
    #[test]
    fn test_discount_follows_threshold(
        items in items_strategy(),
        tier in tier_strategy(),
        enabled in any::<bool>(),
    ) {
        let rules = RulesConfig::default().with_discounts_enabled(enabled);
        let result = calculate_totals(&items, tier, &rules).unwrap();

        let subtotal = exact_subtotal(&items);
        let rule = rules.discounts.rule_for(tier);
        let qualifies = enabled && !items.is_empty() && subtotal >= rule.threshold;

        if qualifies {
            prop_assert_eq!(result.discount_percentage, rule.percentage);
            prop_assert_eq!(
                result.discount.cents(),
                cents(subtotal * rule.percentage.value())
            );
        } else {
            prop_assert_eq!(result.discount_percentage, Rate::ZERO);
            prop_assert!(result.discount.is_zero());
        }
        prop_assert!(result.discount <= result.subtotal);
    }

    /// Property: tax is charged on the discounted base, never the raw subtotal
    #[test]
    fn test_tax_on_discounted_base(items in items_strategy(), tier in tier_strategy()) {
        prop_assume!(!items.is_empty());
        let rules = RulesConfig::default();
        let result = calculate_totals(&items, tier, &rules).unwrap();

        let subtotal = exact_subtotal(&items);
        let discount = subtotal * result.discount_percentage.value();
        let tax_rate = rules.tax_rates.rate_for(tier).value();
        let expected_tax = round_currency((subtotal - discount) * tax_rate);

        prop_assert_eq!(result.tax_rate.value(), tax_rate);
        prop_assert_eq!(result.tax.to_decimal(), expected_tax);
    }

    /// Property: total matches subtotal − discount + tax within one cent
    #[test]
    fn test_total_identity_within_a_cent(items in items_strategy(), tier in tier_strategy()) {
        let result = calculate_totals(&items, tier, &RulesConfig::default()).unwrap();
        let recombined = result.subtotal - result.discount + result.tax;
        prop_assert!((result.total.cents() - recombined.cents()).abs() <= 1);
        prop_assert!(result.total.cents() >= 0);
    }

    /// Property: adding an item never lowers the subtotal
    #[test]
    fn test_subtotal_monotonic(
        items in items_strategy(),
        extra in item_strategy(),
        tier in tier_strategy(),
    ) {
        let rules = RulesConfig::default();
        let before = calculate_totals(&items, tier, &rules).unwrap();

        let mut more = items.clone();
        more.push(extra);
        let after = calculate_totals(&more, tier, &rules).unwrap();

        prop_assert!(after.subtotal >= before.subtotal);
    }

    /// Property: raising a unit price never lowers the subtotal, and never
    /// lowers the total unless the raise crosses a discount threshold
    #[test]
    fn test_total_monotonic_within_discount_band(
        items in items_strategy(),
        index in any::<prop::sample::Index>(),
        raise_cents in 1i64..10_000,
        tier in tier_strategy(),
    ) {
        prop_assume!(!items.is_empty());
        let rules = RulesConfig::default();
        let i = index.index(items.len());

        let mut raised = items.clone();
        raised[i].unit_price += Decimal::new(raise_cents, 2);

        let before = calculate_totals(&items, tier, &rules).unwrap();
        let after = calculate_totals(&raised, tier, &rules).unwrap();

        prop_assert!(after.subtotal >= before.subtotal);
        if before.discount_percentage == after.discount_percentage {
            prop_assert!(after.total >= before.total);
        }
    }

    /// Property: raising one item's quantity never lowers the subtotal, and
    /// never lowers the total while the discount band stays the same
    #[test]
    fn test_quantity_increase_monotonic(
        items in items_strategy(),
        index in any::<prop::sample::Index>(),
        extra_quantity in 1i64..50,
        tier in tier_strategy(),
    ) {
        prop_assume!(!items.is_empty());
        let rules = RulesConfig::default();
        let i = index.index(items.len());

        let mut raised = items.clone();
        raised[i].quantity += extra_quantity;

        let before = calculate_totals(&items, tier, &rules).unwrap();
        let after = calculate_totals(&raised, tier, &rules).unwrap();

        prop_assert!(after.subtotal >= before.subtotal);
        if before.discount_percentage == after.discount_percentage {
            prop_assert!(after.total >= before.total);
        }
    }

    /// Property: with the built-in rules premium never pays more than standard
    #[test]
    fn test_premium_never_costs_more(items in items_strategy()) {
        let rules = RulesConfig::default();
        let standard = calculate_totals(&items, CustomerTier::Standard, &rules).unwrap();
        let premium = calculate_totals(&items, CustomerTier::Premium, &rules).unwrap();
        prop_assert!(premium.total <= standard.total);
    }

    /// Property: same input, same output, explanation included
    #[test]
    fn test_deterministic(items in items_strategy(), tier in tier_strategy()) {
        let rules = RulesConfig::default();
        let first = calculate_totals(&items, tier, &rules).unwrap();
        let second = calculate_totals(&items, tier, &rules).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: any non-positive quantity is rejected
    #[test]
    fn test_non_positive_quantity_rejected(quantity in i64::MIN..=0, cents in 0i64..10_000) {
        let items = vec![LineItem::new("Bad", quantity, Decimal::new(cents, 2))];
        prop_assert!(calculate_totals(&items, CustomerTier::Standard, &RulesConfig::default()).is_err());
    }
}
