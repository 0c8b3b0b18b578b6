//! Terminal rendering for products and the cart.

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{
    cart::{CartState, Notification},
    pricing::line_total,
    products::Product,
};

/// Write a product listing table.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_products<'a>(
    out: &mut impl io::Write,
    products: impl IntoIterator<Item = &'a Product>,
    currency: &'static Currency,
) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Category", "Price", "Stock", "Rating"]);

    let mut rows = 0_usize;

    for product in products {
        builder.push_record([
            product.id.to_string(),
            product.name.clone(),
            product.category.clone(),
            price_label(product, currency),
            if product.in_stock { "In stock" } else { "Out of stock" }.to_string(),
            format!("{:.1} ({})", product.rating, product.reviews),
        ]);

        rows += 1;
    }

    if rows == 0 {
        return writeln!(out, "No products found.");
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(3..4), Alignment::right());

    writeln!(out, "{table}")
}

/// Write the full details of one product.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_product(
    out: &mut impl io::Write,
    product: &Product,
    currency: &'static Currency,
) -> io::Result<()> {
    writeln!(out, "{} (#{})", product.name, product.id)?;
    writeln!(out, "{}", price_label(product, currency))?;

    if !product.in_stock {
        writeln!(out, "Out of stock")?;
    }

    writeln!(
        out,
        "Rated {:.1} from {} reviews",
        product.rating, product.reviews
    )?;

    if !product.description.is_empty() {
        writeln!(out, "\n{}", product.description)?;
    }

    if !product.specs.is_empty() {
        let mut builder = Builder::default();

        for spec in &product.specs {
            builder.push_record([spec.name.as_str(), spec.value.as_str()]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(out, "\n{table}")?;
    }

    if !product.colors.is_empty() {
        writeln!(out, "Colors: {}", product.colors.join(", "))?;
    }

    Ok(())
}

/// Write the cart contents and totals.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cart(out: &mut impl io::Write, state: &CartState) -> io::Result<()> {
    if state.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }

    let currency = state.currency();
    let mut builder = Builder::default();

    builder.push_record(["", "Item", "Unit Price", "Qty", "Total"]);

    for (position, item) in state.items().iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", position + 1),
            format!("{} ({})", item.product().name, item.product_id()),
            format!("{}", item.product().effective_price_in(currency)),
            item.quantity().to_string(),
            format!("{}", line_total(item, currency)),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(out, " Items:    {}", state.item_count())?;
    writeln!(out, " Subtotal: {}", state.subtotal())?;
    writeln!(out, " Shipping: Free")?;
    writeln!(out, " Total:    {}", state.subtotal())
}

/// Write notifications one per line.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_notifications(
    out: &mut impl io::Write,
    notifications: &[Notification],
) -> io::Result<()> {
    for notification in notifications {
        match notification.description() {
            Some(description) => writeln!(out, "{}: {description}", notification.message())?,
            None => writeln!(out, "{}", notification.message())?,
        }
    }

    Ok(())
}

fn price_label(product: &Product, currency: &'static Currency) -> String {
    let price = product.price_in(currency);

    match product.discount_price {
        Some(discount) => format!("{} (was {price})", Money::from_minor(discount, currency)),
        None => format!("{price}"),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::{
        cart::{CartAction, CartState},
        products::ProductSpec,
    };

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> TestResult<String> {
        let mut out = Vec::new();
        f(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    fn watch() -> Product {
        Product::new("2", "Smart Watch Series X", 24_999, "wearables").with_discount_price(19_999)
    }

    #[test]
    fn product_table_lists_each_product() -> TestResult {
        let products = [
            watch(),
            Product::new("6", "Ultralight Laptop", 129_999, "electronics").with_stock(false),
        ];

        let output = render(|out| write_products(out, &products, USD))?;

        assert!(output.contains("Smart Watch Series X"));
        assert!(output.contains("$199.99 (was $249.99)"));
        assert!(output.contains("Out of stock"));

        Ok(())
    }

    #[test]
    fn empty_listing_says_so() -> TestResult {
        let products: [Product; 0] = [];

        let output = render(|out| write_products(out, &products, USD))?;

        assert_eq!(output, "No products found.\n");

        Ok(())
    }

    #[test]
    fn product_details_include_specs() -> TestResult {
        let mut product = watch();
        product.specs.push(ProductSpec {
            name: "Display".to_string(),
            value: "1.4\" AMOLED".to_string(),
        });

        let output = render(|out| write_product(out, &product, USD))?;

        assert!(output.starts_with("Smart Watch Series X (#2)\n"));
        assert!(output.contains("1.4\" AMOLED"));

        Ok(())
    }

    #[test]
    fn cart_shows_lines_and_totals() -> TestResult {
        let mut state = CartState::new(USD);
        state.apply(CartAction::Add {
            product: watch(),
            quantity: 2,
        });

        let output = render(|out| write_cart(out, &state))?;

        assert!(output.contains("$399.98"));
        assert!(output.contains(" Items:    2"));
        assert!(output.contains(" Total:    $399.98"));

        Ok(())
    }

    #[test]
    fn empty_cart_message() -> TestResult {
        let output = render(|out| write_cart(out, &CartState::new(USD)))?;

        assert_eq!(output, "Your cart is empty.\n");

        Ok(())
    }

    #[test]
    fn notifications_render_with_description() -> TestResult {
        let output = render(|out| {
            write_notifications(
                out,
                &[
                    Notification::Removed {
                        product_name: "Desk Lamp".to_string(),
                    },
                    Notification::Cleared,
                ],
            )
        })?;

        assert_eq!(
            output,
            "Removed from your cart: Desk Lamp\nYour cart has been cleared\n"
        );

        Ok(())
    }
}
