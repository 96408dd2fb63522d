//! # Cart Summary
//!
//! Display pricing for the cart page: per-line discounted prices and the
//! order summary box. Everything here is derived on demand from a
//! [`CartState`]; the cart itself never stores discounts, tax or shipping.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  Order Summary                             │
//! │  Subtotal                       $1,147.00  │  ← CartState.total_price
//! │  Discount                         -$98.45  │  ← Σ line savings
//! │  Shipping                            FREE  │  ← policy threshold
//! │  Tax (8%)                          $83.88  │  ← on discounted total
//! │  ──────────────────────────────────────    │
//! │  Total                          $1,132.43  │
//! └────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{CartLine, CartState};
use crate::money::Money;
use crate::types::{ProductId, TaxRate};

// =============================================================================
// Pricing Policy
// =============================================================================

/// Flat demo pricing rules applied on top of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Flat tax rate in basis points.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Orders whose discounted total is strictly above this ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Money,

    /// Shipping fee charged below the threshold.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: Money,
}

fn default_tax_rate_bps() -> u32 {
    crate::DEMO_TAX_RATE_BPS
}

fn default_free_shipping_threshold() -> Money {
    crate::FREE_SHIPPING_THRESHOLD
}

fn default_shipping_fee() -> Money {
    crate::FLAT_SHIPPING_FEE
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate_bps: default_tax_rate_bps(),
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping_fee: default_shipping_fee(),
        }
    }
}

impl PricingPolicy {
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Shipping for a given discounted total. Empty carts ship nothing.
    pub fn shipping_for(&self, discounted_total: Money, is_empty: bool) -> Money {
        if is_empty || discounted_total > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.shipping_fee
        }
    }
}

// =============================================================================
// Line Pricing
// =============================================================================

/// Display prices for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LinePricing {
    pub product_id: ProductId,
    pub quantity: u32,
    #[ts(type = "number")]
    pub unit_price: Money,
    #[ts(type = "number")]
    pub discounted_unit_price: Money,
    /// Unit price × quantity.
    #[ts(type = "number")]
    pub subtotal: Money,
    /// Discounted unit price × quantity.
    #[ts(type = "number")]
    pub total: Money,
    #[ts(type = "number")]
    pub savings: Money,
}

impl From<&CartLine> for LinePricing {
    fn from(line: &CartLine) -> Self {
        let unit_price = line.product.price();
        let discounted_unit_price = line.product.discounted_price();
        let subtotal = unit_price.multiply_quantity(line.quantity);
        let total = discounted_unit_price.multiply_quantity(line.quantity);
        LinePricing {
            product_id: line.product_id(),
            quantity: line.quantity,
            unit_price,
            discounted_unit_price,
            subtotal,
            total,
            savings: subtotal - total,
        }
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// The order summary box.
///
/// ## Pricing Rules
/// - Tax is charged on `discounted_total`, not on the pre-discount
///   `subtotal`
/// - `grand_total = discounted_total + tax + shipping`; shipping is part
///   of the total rather than shown beside it
/// - Sums saturate at the `Money` bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub lines: Vec<LinePricing>,
    #[ts(type = "number")]
    pub total_items: u64,
    /// Pre-discount total; always equals `CartState::total_price`.
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub savings: Money,
    #[ts(type = "number")]
    pub discounted_total: Money,
    #[ts(type = "number")]
    pub tax: Money,
    #[ts(type = "number")]
    pub shipping: Money,
    #[ts(type = "number")]
    pub grand_total: Money,
    pub qualifies_for_free_shipping: bool,
}

impl CartSummary {
    /// Derives the summary for `cart` under `policy`.
    pub fn compute(cart: &CartState, policy: &PricingPolicy) -> Self {
        let lines: Vec<LinePricing> = cart.lines().iter().map(LinePricing::from).collect();

        let subtotal = cart.total_price();
        let discounted_total: Money = lines.iter().map(|l| l.total).sum();
        let savings = subtotal - discounted_total;
        let tax = discounted_total.calculate_tax(policy.tax_rate());
        let shipping = policy.shipping_for(discounted_total, cart.is_empty());

        CartSummary {
            lines,
            total_items: cart.total_items(),
            subtotal,
            savings,
            discounted_total,
            tax,
            shipping,
            grand_total: discounted_total + tax + shipping,
            qualifies_for_free_shipping: !cart.is_empty()
                && discounted_total > policy.free_shipping_threshold,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountRate, Product};

    fn product(id: u32, price_cents: i64, discount_pct: f64) -> Product {
        Product {
            price: Money::from_cents(price_cents),
            discount_percentage: DiscountRate::from_percentage(discount_pct),
            ..Product::placeholder(ProductId::new(id), "Item")
        }
    }

    #[test]
    fn test_empty_cart_summary_is_all_zero() {
        let summary = CartSummary::compute(&CartState::new(), &PricingPolicy::default());
        assert!(summary.grand_total.is_zero());
        assert!(summary.shipping.is_zero());
        assert!(!summary.qualifies_for_free_shipping);
    }

    #[test]
    fn test_small_order_pays_shipping_and_tax() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 2000, 10.0)); // $20.00, 10% off → $18.00
        cart.add_item(&product(1, 2000, 10.0));

        let summary = CartSummary::compute(&cart, &PricingPolicy::default());

        assert_eq!(summary.subtotal.cents(), 4000);
        assert_eq!(summary.discounted_total.cents(), 3600);
        assert_eq!(summary.savings.cents(), 400);
        assert_eq!(summary.tax.cents(), 288); // 8% of $36.00
        assert_eq!(summary.shipping.cents(), 1000);
        assert_eq!(summary.grand_total.cents(), 3600 + 288 + 1000);
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 10001, 0.0));

        let summary = CartSummary::compute(&cart, &PricingPolicy::default());
        assert!(summary.qualifies_for_free_shipping);
        assert!(summary.shipping.is_zero());
    }

    #[test]
    fn test_exactly_threshold_still_pays_shipping() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 10000, 0.0));

        let summary = CartSummary::compute(&cart, &PricingPolicy::default());
        assert_eq!(summary.shipping.cents(), 1000);
    }

    #[test]
    fn test_subtotal_matches_cart_total_price() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 549, 12.96));
        cart.add_item(&product(2, 1299, 0.0));

        let summary = CartSummary::compute(&cart, &PricingPolicy::default());
        assert_eq!(summary.subtotal, cart.total_price());
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[1].savings, Money::zero());
    }

    #[test]
    fn test_tax_on_discounted_total_and_shipping_in_grand_total() {
        let mut cart = CartState::new();
        cart.add_item(&product(1, 5000, 20.0)); // $50.00 → $40.00

        let summary = CartSummary::compute(&cart, &PricingPolicy::default());
        assert_eq!(summary.tax.cents(), 320);
        assert_eq!(summary.grand_total.cents(), 4000 + 320 + 1000);
    }

    #[test]
    fn test_saturated_cart_summary_does_not_panic() {
        let mut cart = CartState::new();
        let pricey = product(1, 5_000_000_000, 0.0);
        cart.add_item(&pricey);
        cart.set_quantity(pricey.id, i64::MAX);
        cart.add_item(&product(2, 100, 10.0));

        let summary = CartSummary::compute(&cart, &PricingPolicy::default());
        assert_eq!(summary.subtotal, Money::from_cents(i64::MAX));
        assert_eq!(summary.grand_total, Money::from_cents(i64::MAX));
        assert!(summary.qualifies_for_free_shipping);
    }
}
