//! Catalog
//!
//! The static, read-only set of purchasable products. Lookups never fail:
//! an unknown id or category is reported as absence.

use std::{fs, path::Path};

use rustc_hash::{FxHashMap, FxHashSet};
use rusty_money::iso::Currency;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::products::Product;

pub mod fixture;

use fixture::{CatalogFixture, parse_currency};

/// Category id that matches every product.
pub const ALL_CATEGORIES: &str = "all";

const BUNDLED_CATALOG: &str = include_str!("../../fixtures/catalog.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A price is not in the catalog currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// A product's discounted price is higher than its regular price
    #[error("Product {0} has a discount price above its regular price")]
    DiscountAbovePrice(String),

    /// A product references a category that is not listed
    #[error("Product {0} references unknown category {1}")]
    UnknownCategory(String, String),
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id, matched exactly against [`Product::category`]
    pub id: String,

    /// Display name
    pub name: String,
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    currency: &'static Currency,
    categories: Vec<Category>,
    products: Vec<Product>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from products priced in `currency`.
    ///
    /// The [`ALL_CATEGORIES`] entry is prepended to `categories` when missing.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::DuplicateProduct`]: two products share an id.
    /// - [`CatalogError::UnknownCategory`]: a product's category is not listed.
    pub fn new(
        currency: &'static Currency,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> Result<Self, CatalogError> {
        let mut categories = categories;

        if !categories.iter().any(|category| category.id == ALL_CATEGORIES) {
            categories.insert(
                0,
                Category {
                    id: ALL_CATEGORIES.to_string(),
                    name: "All Products".to_string(),
                },
            );
        }

        let known: FxHashSet<&str> = categories.iter().map(|c| c.id.as_str()).collect();

        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            if !known.contains(product.category.as_str()) {
                return Err(CatalogError::UnknownCategory(
                    product.id.to_string(),
                    product.category.clone(),
                ));
            }

            if index.insert(product.id.to_string(), position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.to_string()));
            }
        }

        Ok(Self {
            currency,
            categories,
            products,
            index,
        })
    }

    /// The catalog shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled document is invalid.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUNDLED_CATALOG)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read, parsed or validated.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the document cannot be parsed or validated.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
        let currency = parse_currency(&fixture.currency)?;

        let products = fixture
            .products
            .into_iter()
            .map(|product| product.into_product(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(currency, fixture.categories, products)
    }

    /// Currency shared by every product price.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Categories in display order, starting with [`ALL_CATEGORIES`].
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        let position = self.index.get(id)?;

        self.products.get(*position)
    }

    /// Products in a category; [`ALL_CATEGORIES`] returns every product.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |product| category == ALL_CATEGORIES || product.category == category)
    }

    /// Featured products in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.featured)
    }

    /// Products whose name contains `term`, ignoring case. Catalog order is kept.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Product> + use<'a> {
        let term = term.trim().to_lowercase();

        self.products
            .iter()
            .filter(move |product| product.name.to_lowercase().contains(&term))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    fn ids<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<&'a str> {
        products.map(|product| product.id.as_str()).collect()
    }

    fn audio() -> Category {
        Category {
            id: "audio".to_string(),
            name: "Audio".to_string(),
        }
    }

    #[test]
    fn bundled_catalog_loads() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.currency(), USD);
        assert_eq!(
            catalog.categories().first().map(|c| c.id.as_str()),
            Some(ALL_CATEGORIES)
        );

        Ok(())
    }

    #[test]
    fn get_returns_product_or_none() -> TestResult {
        let catalog = Catalog::bundled()?;

        let watch = catalog.get("2");

        assert_eq!(watch.map(|p| p.name.as_str()), Some("Smart Watch Series X"));
        assert_eq!(watch.and_then(|p| p.discount_price), Some(19_999));
        assert!(catalog.get("missing").is_none());

        Ok(())
    }

    #[test]
    fn by_category_filters_exact_match() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(ids(catalog.by_category("audio")), vec!["1", "3"]);
        assert_eq!(ids(catalog.by_category("electronics")), vec!["4", "6"]);
        assert!(catalog.by_category("Audio").next().is_none());

        Ok(())
    }

    #[test]
    fn all_category_returns_everything() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(
            ids(catalog.by_category(ALL_CATEGORIES)),
            vec!["1", "2", "3", "4", "5", "6"]
        );

        Ok(())
    }

    #[test]
    fn featured_filters_by_flag() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(ids(catalog.featured()), vec!["1", "2", "4", "6"]);

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive() -> TestResult {
        let catalog = Catalog::bundled()?;

        assert_eq!(ids(catalog.search("  WIRELESS ")), vec!["1"]);
        assert_eq!(ids(catalog.search("A")).len(), 6);
        assert!(catalog.search("toaster").next().is_none());

        Ok(())
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let products = vec![
            Product::new("1", "Headphones", 100, "audio"),
            Product::new("1", "Speaker", 200, "audio"),
        ];

        let result = Catalog::new(USD, vec![audio()], products);

        assert!(matches!(result, Err(CatalogError::DuplicateProduct(id)) if id == "1"));
    }

    #[test]
    fn new_rejects_unknown_category() {
        let products = vec![Product::new("1", "Lamp", 100, "lighting")];

        let result = Catalog::new(USD, vec![audio()], products);

        assert!(matches!(
            result,
            Err(CatalogError::UnknownCategory(id, category)) if id == "1" && category == "lighting"
        ));
    }

    #[test]
    fn new_prepends_all_category() -> TestResult {
        let catalog = Catalog::new(USD, vec![audio()], Vec::new())?;

        let category_ids: Vec<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();

        assert_eq!(category_ids, vec![ALL_CATEGORIES, "audio"]);
        assert!(catalog.is_empty());

        Ok(())
    }

    #[test]
    fn from_yaml_rejects_unknown_catalog_currency() {
        let result = Catalog::from_yaml_str("currency: JPY\ncategories: []\nproducts: []\n");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "JPY"));
    }

    #[test]
    fn from_path_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        writeln!(
            file,
            "currency: GBP\ncategories:\n  - {{ id: audio, name: Audio }}\nproducts:\n  - id: a\n    name: Radio\n    price: 12.50 GBP\n    category: audio\n"
        )?;

        let catalog = Catalog::from_path(file.path())?;

        assert_eq!(catalog.get("a").map(|p| p.price), Some(1250));
        assert_eq!(catalog.get("a").map(|p| p.in_stock), Some(true));

        Ok(())
    }
}
