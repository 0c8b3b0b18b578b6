//! Pricing

use rusty_money::{Money, iso::Currency};

use crate::cart::CartLineItem;

/// Totals derived from a list of cart line items.
///
/// Only ever produced by [`cart_totals`], so the values always agree with the
/// items they were computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    item_count: u64,
    subtotal: Money<'static, Currency>,
}

impl CartTotals {
    /// Totals for an empty cart.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        Self {
            item_count: 0,
            subtotal: Money::from_minor(0, currency),
        }
    }

    /// Sum of all line item quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of effective price times quantity over all line items.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }
}

/// Effective price times quantity, in minor units. Saturates on overflow.
#[must_use]
pub fn line_total_minor(item: &CartLineItem) -> i64 {
    item.product()
        .effective_price()
        .saturating_mul(i64::from(item.quantity()))
}

/// Effective price times quantity as money in the given currency.
#[must_use]
pub fn line_total(item: &CartLineItem, currency: &'static Currency) -> Money<'static, Currency> {
    Money::from_minor(line_total_minor(item), currency)
}

/// Recompute the item count and subtotal of a list of line items.
#[must_use]
pub fn cart_totals(items: &[CartLineItem], currency: &'static Currency) -> CartTotals {
    let (item_count, subtotal_minor) = items
        .iter()
        .fold((0_u64, 0_i64), |(count, subtotal), item| {
            (
                count.saturating_add(u64::from(item.quantity())),
                subtotal.saturating_add(line_total_minor(item)),
            )
        });

    CartTotals {
        item_count,
        subtotal: Money::from_minor(subtotal_minor, currency),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use crate::products::Product;

    use super::*;

    fn product_a() -> Product {
        Product::new("a", "Product A", 100, "audio")
    }

    fn product_b() -> Product {
        Product::new("b", "Product B", 50, "audio").with_discount_price(40)
    }

    #[test]
    fn empty_items_total_zero() {
        let totals = cart_totals(&[], USD);

        assert_eq!(totals, CartTotals::zero(USD));
        assert_eq!(totals.item_count(), 0);
        assert_eq!(totals.subtotal(), Money::from_minor(0, USD));
    }

    #[test]
    fn totals_use_effective_price() {
        let items = [
            CartLineItem::new(product_a(), 1),
            CartLineItem::new(product_b(), 2),
        ];

        let totals = cart_totals(&items, USD);

        assert_eq!(totals.item_count(), 3);
        assert_eq!(totals.subtotal(), Money::from_minor(180, USD));
    }

    #[test]
    fn line_total_multiplies_quantity() {
        let item = CartLineItem::new(product_b(), 3);

        assert_eq!(line_total(&item, USD), Money::from_minor(120, USD));
    }

    #[test]
    fn line_total_saturates() {
        let item = CartLineItem::new(Product::new("x", "Huge", i64::MAX, "audio"), 2);

        assert_eq!(line_total_minor(&item), i64::MAX);
    }
}
