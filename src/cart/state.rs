//! Cart state
//!
//! [`CartState::apply`] is the only way line items change. It performs no
//! I/O; the returned [`CartChange`] tells the caller what to persist and
//! announce.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{CartLineItem, notifications::Notification},
    pricing::{CartTotals, cart_totals},
    products::{Product, ProductId},
};

/// A cart mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add `quantity` units of a product, merging with an existing line item.
    Add {
        /// Product to add
        product: Product,
        /// Units to add; zero is treated as one
        quantity: u32,
    },

    /// Remove the line item for a product.
    Remove(ProductId),

    /// Set the quantity of a line item; below one removes it.
    SetQuantity {
        /// Product whose line item changes
        product_id: ProductId,
        /// New quantity
        quantity: i64,
    },

    /// Remove every line item.
    Clear,

    /// Show the cart.
    Open,

    /// Hide the cart.
    Close,

    /// Flip cart visibility.
    Toggle,
}

/// The outcome of applying a [`CartAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended.
    Added {
        /// Product id
        product_id: ProductId,
        /// Product name
        product_name: String,
    },

    /// An existing line item's quantity was increased.
    Updated {
        /// Product id
        product_id: ProductId,
        /// Product name
        product_name: String,
        /// Quantity after the increase
        quantity: u32,
    },

    /// A line item's quantity was set.
    QuantitySet {
        /// Product id
        product_id: ProductId,
        /// New quantity
        quantity: u32,
    },

    /// A line item was removed.
    Removed {
        /// Product id
        product_id: ProductId,
        /// Product name
        product_name: String,
    },

    /// All line items were removed.
    Cleared,

    /// Visibility changed (or was reasserted) to the given value.
    Visibility(bool),

    /// Nothing matched; the state is as before.
    Unchanged,
}

/// What a change requires of persisted storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    /// Write the current line items.
    Save,

    /// Delete the persisted entry.
    Erase,

    /// Leave storage alone.
    Skip,
}

impl CartChange {
    /// Whether line items changed.
    #[must_use]
    pub fn is_item_change(&self) -> bool {
        matches!(
            self,
            CartChange::Added { .. }
                | CartChange::Updated { .. }
                | CartChange::QuantitySet { .. }
                | CartChange::Removed { .. }
                | CartChange::Cleared
        )
    }

    /// Storage work required by this change.
    #[must_use]
    pub fn persistence(&self) -> Persistence {
        match self {
            CartChange::Cleared => Persistence::Erase,
            change if change.is_item_change() => Persistence::Save,
            _ => Persistence::Skip,
        }
    }

    /// The user-visible notification for this change, if any.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        match self {
            CartChange::Added { product_name, .. } => Some(Notification::Added {
                product_name: product_name.clone(),
            }),
            CartChange::Updated { product_name, .. } => Some(Notification::Updated {
                product_name: product_name.clone(),
            }),
            CartChange::Removed { product_name, .. } => Some(Notification::Removed {
                product_name: product_name.clone(),
            }),
            CartChange::Cleared => Some(Notification::Cleared),
            CartChange::QuantitySet { .. } | CartChange::Visibility(_) | CartChange::Unchanged => {
                None
            }
        }
    }
}

/// Line items, visibility and the totals derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct CartState {
    items: Vec<CartLineItem>,
    is_open: bool,
    totals: CartTotals,
    currency: &'static Currency,
}

impl CartState {
    /// An empty, closed cart.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            is_open: false,
            totals: CartTotals::zero(currency),
            currency,
        }
    }

    /// A closed cart holding `items`.
    ///
    /// Line items for the same product are merged so that each product
    /// appears once, in order of first appearance.
    #[must_use]
    pub fn from_items(
        items: impl IntoIterator<Item = CartLineItem>,
        currency: &'static Currency,
    ) -> Self {
        let mut merged: Vec<CartLineItem> = Vec::new();

        for item in items {
            if item.quantity() == 0 {
                continue;
            }

            match merged
                .iter_mut()
                .find(|existing| existing.product_id() == item.product_id())
            {
                Some(existing) => existing.increase(item.quantity()),
                None => merged.push(item),
            }
        }

        let totals = cart_totals(&merged, currency);

        Self {
            items: merged,
            is_open: false,
            totals,
            currency,
        }
    }

    /// Apply a mutation and report what changed.
    pub fn apply(&mut self, action: CartAction) -> CartChange {
        let change = match action {
            CartAction::Add { product, quantity } => self.add(product, quantity),
            CartAction::Remove(product_id) => self.remove(&product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            CartAction::Clear => {
                self.items.clear();
                CartChange::Cleared
            }
            CartAction::Open => self.set_open(true),
            CartAction::Close => self.set_open(false),
            CartAction::Toggle => self.set_open(!self.is_open),
        };

        if change.is_item_change() {
            self.totals = cart_totals(&self.items, self.currency);
        }

        change
    }

    fn add(&mut self, product: Product, quantity: u32) -> CartChange {
        let quantity = quantity.max(1);

        self.is_open = true;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.product_id() == &product.id)
        {
            existing.increase(quantity);

            return CartChange::Updated {
                product_id: product.id,
                product_name: product.name,
                quantity: existing.quantity(),
            };
        }

        let change = CartChange::Added {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
        };

        self.items.push(CartLineItem::new(product, quantity));

        change
    }

    fn remove(&mut self, product_id: &ProductId) -> CartChange {
        let Some(position) = self.position(product_id) else {
            return CartChange::Unchanged;
        };

        let removed = self.items.remove(position);

        CartChange::Removed {
            product_id: removed.product.id,
            product_name: removed.product.name,
        }
    }

    fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> CartChange {
        if quantity < 1 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self
            .items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
        {
            Some(item) => {
                item.set_quantity(quantity);

                CartChange::QuantitySet {
                    product_id: product_id.clone(),
                    quantity,
                }
            }
            None => CartChange::Unchanged,
        }
    }

    fn set_open(&mut self, is_open: bool) -> CartChange {
        self.is_open = is_open;

        CartChange::Visibility(is_open)
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line item for a product.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartLineItem> {
        self.items
            .iter()
            .find(|item| item.product_id().as_str() == product_id)
    }

    /// Whether the cart is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Sum of all line item quantities.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.totals.item_count()
    }

    /// Sum of effective price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.totals.subtotal()
    }

    /// Derived totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    /// Whether there are no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Currency of all cart amounts.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
