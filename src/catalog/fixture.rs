//! Catalog Fixtures
//!
//! The on-disk YAML shape of a catalog and its conversion into [`Product`]s.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::iso::{Currency, EUR, GBP, USD};
use serde::Deserialize;

use crate::{
    catalog::{Category, CatalogError},
    products::{Product, ProductSpec},
};

/// Catalog document
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// ISO currency code shared by every product price
    pub currency: String,

    /// Browsable categories, in display order
    pub categories: Vec<Category>,

    /// Products, in display order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Product price (e.g., "299.99 USD")
    pub price: String,

    /// Discounted price (e.g., "199.99 USD")
    #[serde(default)]
    pub discount_price: Option<String>,

    /// Category id
    pub category: String,

    /// Image URLs
    #[serde(default)]
    pub images: Vec<String>,

    /// Featured flag
    #[serde(default)]
    pub featured: bool,

    /// Stock flag
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,

    /// Average rating
    #[serde(default)]
    pub rating: f32,

    /// Review count
    #[serde(default)]
    pub reviews: u32,

    /// Named specifications
    #[serde(default)]
    pub specs: Vec<ProductSpec>,

    /// Colour hex codes
    #[serde(default)]
    pub colors: Vec<String>,
}

fn default_in_stock() -> bool {
    true
}

impl ProductFixture {
    /// Convert into a product priced in `currency`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidPrice`]: a price is not in `AMOUNT CURRENCY` form.
    /// - [`CatalogError::UnknownCurrency`]: a price uses an unsupported currency code.
    /// - [`CatalogError::CurrencyMismatch`]: a price is not in the catalog currency.
    /// - [`CatalogError::DiscountAbovePrice`]: the discounted price exceeds the regular price.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product, CatalogError> {
        let price = parse_price_in(&self.price, currency)?;

        let discount_price = self
            .discount_price
            .as_deref()
            .map(|discount| parse_price_in(discount, currency))
            .transpose()?;

        if discount_price.is_some_and(|discount| discount > price) {
            return Err(CatalogError::DiscountAbovePrice(self.id));
        }

        Ok(Product {
            id: self.id.into(),
            name: self.name,
            description: self.description.trim().to_string(),
            price,
            discount_price,
            category: self.category,
            images: self.images,
            featured: self.featured,
            in_stock: self.in_stock,
            rating: self.rating,
            reviews: self.reviews,
            specs: self.specs,
            colors: self.colors,
        })
    }
}

fn parse_price_in(s: &str, currency: &'static Currency) -> Result<i64, CatalogError> {
    let (minor_units, price_currency) = parse_price(s)?;

    if price_currency != currency {
        return Err(CatalogError::CurrencyMismatch(
            currency.iso_alpha_code.to_string(),
            price_currency.iso_alpha_code.to_string(),
        ));
    }

    Ok(minor_units)
}

/// Look up a supported currency by ISO code.
///
/// # Errors
///
/// Returns [`CatalogError::UnknownCurrency`] for codes other than GBP, USD and EUR.
pub fn parse_currency(code: &str) -> Result<&'static Currency, CatalogError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(CatalogError::UnknownCurrency(other.to_string())),
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let currency_code = parts
        .get(1)
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, parse_currency(currency_code)?))
}
