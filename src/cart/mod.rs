//! Cart
//!
//! Line items, the pure cart reducer, and the store that persists and
//! announces every change.

use serde::{Deserialize, Serialize};

use crate::products::{Product, ProductId};

pub mod notifications;
pub mod state;
pub mod storage;
pub mod store;

pub use notifications::{Notification, NotificationLog, Notifier, TracingNotifier};
pub use state::{CartAction, CartChange, CartState, Persistence};
pub use storage::{CART_STORAGE_KEY, CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;

/// One distinct product's presence in the cart.
///
/// Holds a full copy of the product as it was when first added. The quantity
/// is always at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    product: Product,
    quantity: u32,
}

impl CartLineItem {
    /// Create a line item; a zero quantity is raised to one.
    #[must_use]
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
        }
    }

    /// The product copy held by this line item.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Id of the product in this line item.
    #[must_use]
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Number of units.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub(crate) fn increase(&mut self, quantity: u32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }
}
