//! Cart store

use rusty_money::iso::Currency;
use tracing::{debug, warn};

use crate::{
    cart::{
        notifications::{Notifier, TracingNotifier},
        state::{CartAction, CartChange, CartState, Persistence},
        storage::{CartStorage, StorageError, decode_items, encode_items},
    },
    products::{Product, ProductId},
};

/// Owns the cart state together with its storage and notifier.
///
/// Every mutation runs the pure reducer on [`CartState`], then hands the
/// resulting [`CartChange`] to [`CartStore::commit`], which is the only place
/// storage is written and notifications are raised. Storage failures are
/// logged and otherwise ignored.
#[derive(Debug)]
pub struct CartStore<S, N = TracingNotifier> {
    state: CartState,
    storage: S,
    notifier: N,
}

impl<S: CartStorage> CartStore<S> {
    /// Restore a cart from `storage`, logging notifications via `tracing`.
    pub fn load(storage: S, currency: &'static Currency) -> Self {
        Self::load_with_notifier(storage, TracingNotifier, currency)
    }
}

impl<S: CartStorage, N: Notifier> CartStore<S, N> {
    /// Restore a cart from `storage`.
    ///
    /// A missing, unreadable or unparseable entry yields an empty cart. The
    /// restored cart is always closed.
    pub fn load_with_notifier(storage: S, notifier: N, currency: &'static Currency) -> Self {
        let state = restore(&storage, currency);

        Self {
            state,
            storage,
            notifier,
        }
    }

    /// Add `quantity` units of `product`, opening the cart.
    #[tracing::instrument(
        name = "cart.store.add_item",
        skip(self, product),
        fields(product_id = %product.id)
    )]
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> CartChange {
        self.dispatch(CartAction::Add {
            product: product.clone(),
            quantity,
        })
    }

    /// Remove the line item for `product_id`; unknown ids are ignored.
    #[tracing::instrument(name = "cart.store.remove_item", skip(self))]
    pub fn remove_item(&mut self, product_id: &str) -> CartChange {
        self.dispatch(CartAction::Remove(ProductId::from(product_id)))
    }

    /// Set the quantity for `product_id`; below one removes the line item.
    #[tracing::instrument(name = "cart.store.set_quantity", skip(self))]
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CartChange {
        self.dispatch(CartAction::SetQuantity {
            product_id: ProductId::from(product_id),
            quantity,
        })
    }

    /// Remove every line item and erase the persisted entry.
    #[tracing::instrument(name = "cart.store.clear", skip(self))]
    pub fn clear(&mut self) -> CartChange {
        self.dispatch(CartAction::Clear)
    }

    /// Show the cart.
    pub fn open(&mut self) -> CartChange {
        self.dispatch(CartAction::Open)
    }

    /// Hide the cart.
    pub fn close(&mut self) -> CartChange {
        self.dispatch(CartAction::Close)
    }

    /// Flip cart visibility.
    pub fn toggle(&mut self) -> CartChange {
        self.dispatch(CartAction::Toggle)
    }

    /// Apply an action and commit its side effects.
    pub fn dispatch(&mut self, action: CartAction) -> CartChange {
        let change = self.state.apply(action);

        self.commit(&change);

        change
    }

    /// Persist and announce a change that has already been applied.
    fn commit(&mut self, change: &CartChange) {
        debug!(?change, item_count = self.state.item_count(), "cart changed");

        if let Err(error) = self.persist(change.persistence()) {
            warn!(%error, "failed to persist cart");
        }

        if let Some(notification) = change.notification() {
            self.notifier.notify(&notification);
        }
    }

    fn persist(&mut self, persistence: Persistence) -> Result<(), StorageError> {
        match persistence {
            Persistence::Save => {
                let payload = encode_items(self.state.items())?;
                self.storage.save(&payload)
            }
            Persistence::Erase => self.storage.erase(),
            Persistence::Skip => Ok(()),
        }
    }

    /// Current cart state.
    #[must_use]
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// The backing storage.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

fn restore<S: CartStorage>(storage: &S, currency: &'static Currency) -> CartState {
    let payload = match storage.load() {
        Ok(Some(payload)) => payload,
        Ok(None) => return CartState::new(currency),
        Err(error) => {
            warn!(%error, "failed to read persisted cart, starting empty");
            return CartState::new(currency);
        }
    };

    match decode_items(&payload) {
        Ok(items) => CartState::from_items(items, currency),
        Err(error) => {
            warn!(%error, "failed to parse persisted cart, starting empty");
            CartState::new(currency)
        }
    }
}
