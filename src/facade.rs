//! Cart facade
//!
//! A cheaply clonable handle over one shared [`CartStore`], handed to every
//! component that reads or changes the cart. All handles see the same cart.
//!
//! Handles borrow the store only for the duration of each call, so a
//! [`Notifier`] must not call back into the facade while notifying.

use std::{cell::RefCell, rc::Rc};

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{CartLineItem, CartState, CartStorage, CartStore, Notifier, TracingNotifier},
    products::Product,
};

/// Errors raised by facade operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product cannot be purchased right now.
    #[error("{0} is out of stock")]
    OutOfStock(String),
}

/// A point-in-time copy of the cart for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    /// Line items in cart order
    pub items: Vec<CartLineItem>,

    /// Whether the cart is shown
    pub is_open: bool,

    /// Sum of quantities
    pub item_count: u64,

    /// Sum of effective price times quantity
    pub subtotal: Money<'static, Currency>,
}

/// Shared handle to the cart.
#[derive(Debug)]
pub struct CartFacade<S, N = TracingNotifier> {
    store: Rc<RefCell<CartStore<S, N>>>,
}

impl<S, N> Clone for CartFacade<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
        }
    }
}

impl<S: CartStorage, N: Notifier> CartFacade<S, N> {
    /// Wrap a store.
    pub fn new(store: CartStore<S, N>) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
        }
    }

    /// Read the current state without copying it.
    pub fn with_state<R>(&self, f: impl FnOnce(&CartState) -> R) -> R {
        f(self.store.borrow().state())
    }

    /// Read the underlying store.
    pub fn with_store<R>(&self, f: impl FnOnce(&CartStore<S, N>) -> R) -> R {
        f(&self.store.borrow())
    }

    /// Copy the current cart for rendering.
    #[must_use]
    pub fn view(&self) -> CartView {
        self.with_state(|state| CartView {
            items: state.items().to_vec(),
            is_open: state.is_open(),
            item_count: state.item_count(),
            subtotal: state.subtotal(),
        })
    }

    /// Line items in cart order.
    #[must_use]
    pub fn items(&self) -> Vec<CartLineItem> {
        self.with_state(|state| state.items().to_vec())
    }

    /// Sum of quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.with_state(CartState::item_count)
    }

    /// Sum of effective price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.with_state(CartState::subtotal)
    }

    /// Whether the cart is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.with_state(CartState::is_open)
    }

    /// Whether there are no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.with_state(CartState::is_empty)
    }

    /// Add a product, one unit when `quantity` is `None`, and open the cart.
    ///
    /// The stock check lives here, in front of the shop's add control.
    /// [`CartStore::add_item`] itself accepts any product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::OutOfStock`] without touching the cart if the
    /// product is not in stock.
    pub fn add_to_cart(&self, product: &Product, quantity: Option<u32>) -> Result<(), CartError> {
        if !product.in_stock {
            return Err(CartError::OutOfStock(product.name.clone()));
        }

        self.store
            .borrow_mut()
            .add_item(product, quantity.unwrap_or(1));

        Ok(())
    }

    /// Remove a product's line item.
    pub fn remove_from_cart(&self, product_id: &str) {
        self.store.borrow_mut().remove_item(product_id);
    }

    /// Set a product's quantity; below one removes it.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) {
        self.store.borrow_mut().set_quantity(product_id, quantity);
    }

    /// Remove every line item.
    pub fn clear_cart(&self) {
        self.store.borrow_mut().clear();
    }

    /// Show the cart.
    pub fn open_cart(&self) {
        self.store.borrow_mut().open();
    }

    /// Hide the cart.
    pub fn close_cart(&self) {
        self.store.borrow_mut().close();
    }

    /// Flip cart visibility.
    pub fn toggle_cart(&self) {
        self.store.borrow_mut().toggle();
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;

    use crate::cart::{MemoryStorage, NotificationLog};

    use super::*;

    fn facade() -> CartFacade<MemoryStorage, NotificationLog> {
        CartFacade::new(CartStore::load_with_notifier(
            MemoryStorage::new(),
            NotificationLog::new(),
            USD,
        ))
    }

    #[test]
    fn clones_share_one_cart() -> Result<(), CartError> {
        let header = facade();
        let drawer = header.clone();

        drawer.add_to_cart(
            &Product::new("5", "Desk Lamp", 8_999, "accessories"),
            Some(2),
        )?;

        assert_eq!(header.item_count(), 2);
        assert_eq!(header.subtotal(), Money::from_minor(17_998, USD));
        assert!(header.is_open());

        Ok(())
    }

    #[test]
    fn add_defaults_to_one_unit() -> Result<(), CartError> {
        let cart = facade();

        cart.add_to_cart(&Product::new("5", "Desk Lamp", 8_999, "accessories"), None)?;

        assert_eq!(cart.item_count(), 1);

        Ok(())
    }

    #[test]
    fn out_of_stock_products_are_rejected() {
        let cart = facade();
        let laptop =
            Product::new("6", "Ultralight Laptop", 129_999, "electronics").with_stock(false);

        let result = cart.add_to_cart(&laptop, None);

        assert_eq!(
            result,
            Err(CartError::OutOfStock("Ultralight Laptop".to_string()))
        );
        assert!(cart.is_empty());
        assert!(!cart.is_open());
    }

    #[test]
    fn view_reflects_updates() -> Result<(), CartError> {
        let cart = facade();
        let lamp = Product::new("5", "Desk Lamp", 8_999, "accessories");

        cart.add_to_cart(&lamp, None)?;
        cart.update_quantity("5", 3);
        cart.close_cart();

        let view = cart.view();

        assert_eq!(view.item_count, 3);
        assert_eq!(view.items.len(), 1);
        assert!(!view.is_open);

        cart.toggle_cart();
        cart.remove_from_cart("5");

        assert!(cart.is_open());
        assert!(cart.items().is_empty());

        Ok(())
    }

    #[test]
    fn clear_cart_empties_and_notifies() -> Result<(), CartError> {
        let cart = facade();
        cart.add_to_cart(&Product::new("5", "Desk Lamp", 8_999, "accessories"), None)?;

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(
            cart.with_store(|store| store.notifier().entries().last().cloned()),
            Some(crate::cart::Notification::Cleared)
        );

        Ok(())
    }
}
