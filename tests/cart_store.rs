//! Cart store integration tests against the bundled catalog.
//!
//! Covers the lifecycle a shopper goes through across restarts: adding the
//! same product twice, changing and zeroing quantities, clearing, and the
//! cart surviving a reload from its storage file.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use storefront::prelude::*;

fn catalog_product(catalog: &Catalog, id: &str) -> TestResult<Product> {
    let product = catalog.get(id).ok_or("product missing from catalog")?;

    Ok(product.clone())
}

#[test]
fn totals_follow_effective_prices() -> TestResult {
    let catalog = Catalog::bundled()?;
    let watch = catalog_product(&catalog, "2")?;
    let lamp = catalog_product(&catalog, "5")?;

    let mut store =
        CartStore::load_with_notifier(MemoryStorage::new(), NotificationLog::new(), USD);

    store.add_item(&lamp, 2);
    store.add_item(&watch, 1);

    // 2 x 89.99 + 1 x 199.99 (discounted from 249.99)
    assert_eq!(store.state().item_count(), 3);
    assert_eq!(store.state().subtotal(), Money::from_minor(37_997, USD));

    Ok(())
}

#[test]
fn repeated_adds_merge_into_one_line() -> TestResult {
    let catalog = Catalog::bundled()?;
    let speaker = catalog_product(&catalog, "3")?;

    let mut store =
        CartStore::load_with_notifier(MemoryStorage::new(), NotificationLog::new(), USD);

    assert!(matches!(store.add_item(&speaker, 1), CartChange::Added { .. }));
    assert!(matches!(
        store.add_item(&speaker, 2),
        CartChange::Updated { quantity: 3, .. }
    ));

    assert_eq!(store.state().items().len(), 1);
    assert_eq!(store.state().item_count(), 3);

    assert_eq!(
        store.notifier().entries(),
        vec![
            Notification::Added {
                product_name: "Portable Bluetooth Speaker".to_string()
            },
            Notification::Updated {
                product_name: "Portable Bluetooth Speaker".to_string()
            },
        ]
    );

    Ok(())
}

#[test]
fn zero_quantity_removes_the_line() -> TestResult {
    let catalog = Catalog::bundled()?;
    let headphones = catalog_product(&catalog, "1")?;
    let lamp = catalog_product(&catalog, "5")?;

    let mut store =
        CartStore::load_with_notifier(MemoryStorage::new(), NotificationLog::new(), USD);

    store.add_item(&headphones, 1);
    store.add_item(&lamp, 1);
    store.set_quantity("1", 0);

    assert!(store.state().get("1").is_none());
    assert_eq!(store.state().item_count(), 1);
    assert_eq!(store.state().subtotal(), Money::from_minor(8_999, USD));

    Ok(())
}

#[test]
fn cart_survives_reload_from_file() -> TestResult {
    let catalog = Catalog::bundled()?;
    let drone = catalog_product(&catalog, "4")?;
    let lamp = catalog_product(&catalog, "5")?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cart.json");

    {
        let cart = CartFacade::new(CartStore::load_with_notifier(
            FileStorage::new(&path),
            NotificationLog::new(),
            USD,
        ));

        cart.add_to_cart(&drone, None)?;
        cart.add_to_cart(&lamp, Some(3))?;
        cart.update_quantity("5", 2);
    }

    let reloaded = CartFacade::new(CartStore::load_with_notifier(
        FileStorage::new(&path),
        NotificationLog::new(),
        USD,
    ));

    let view = reloaded.view();

    assert_eq!(view.items.len(), 2);
    assert_eq!(view.item_count, 3);
    assert_eq!(view.subtotal, Money::from_minor(79_999 + 2 * 8_999, USD));
    assert!(!view.is_open, "a reloaded cart starts closed");

    Ok(())
}

#[test]
fn clearing_erases_the_file() -> TestResult {
    let catalog = Catalog::bundled()?;
    let lamp = catalog_product(&catalog, "5")?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cart.json");

    let cart = CartFacade::new(CartStore::load_with_notifier(
        FileStorage::new(&path),
        NotificationLog::new(),
        USD,
    ));

    cart.add_to_cart(&lamp, None)?;

    assert!(path.exists());

    cart.clear_cart();

    assert!(!path.exists());

    let reloaded = CartStore::load(FileStorage::new(&path), USD);

    assert!(reloaded.state().is_empty());

    Ok(())
}

#[test]
fn corrupt_file_starts_an_empty_cart() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cart.json");

    std::fs::write(&path, "{not json")?;

    let store = CartStore::load(FileStorage::new(&path), USD);

    assert!(store.state().is_empty());
    assert_eq!(store.state().subtotal(), Money::from_minor(0, USD));

    Ok(())
}
