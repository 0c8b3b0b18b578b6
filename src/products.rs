//! Products

use std::{borrow::Borrow, fmt};

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A named product specification, e.g. `Battery Life: 30 hours`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Specification name
    pub name: String,

    /// Specification value
    pub value: String,
}

/// Product
///
/// Prices are stored in minor units of the owning catalog's currency. The
/// serialized form is what the cart persists for each line item, so field
/// names stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product description
    #[serde(default)]
    pub description: String,

    /// Regular price, in minor units
    pub price: i64,

    /// Discounted price, in minor units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<i64>,

    /// Category id
    pub category: String,

    /// Image URLs, primary image first
    #[serde(default)]
    pub images: Vec<String>,

    /// Whether the product is featured on the home page
    #[serde(default)]
    pub featured: bool,

    /// Whether the product can be purchased
    pub in_stock: bool,

    /// Average review rating (0-5)
    #[serde(default)]
    pub rating: f32,

    /// Number of reviews
    #[serde(default)]
    pub reviews: u32,

    /// Technical specifications, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<ProductSpec>,

    /// Available colours as hex codes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

impl Product {
    /// Create an in-stock product with the minimum required details.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            discount_price: None,
            category: category.into(),
            images: Vec::new(),
            featured: false,
            in_stock: true,
            rating: 0.0,
            reviews: 0,
            specs: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Set the discounted price, in minor units.
    #[must_use]
    pub fn with_discount_price(mut self, discount_price: i64) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Set the stock flag.
    #[must_use]
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Set the featured flag.
    #[must_use]
    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// The price a customer pays for one unit: the discounted price when set,
    /// otherwise the regular price.
    #[must_use]
    pub fn effective_price(&self) -> i64 {
        self.discount_price.unwrap_or(self.price)
    }

    /// Whether a discounted price is set.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_price.is_some()
    }

    /// Regular price as money in the given currency.
    #[must_use]
    pub fn price_in(&self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(self.price, currency)
    }

    /// Effective price as money in the given currency.
    #[must_use]
    pub fn effective_price_in(&self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(self.effective_price(), currency)
    }

    /// The first image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
