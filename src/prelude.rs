//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CART_STORAGE_KEY, CartAction, CartChange, CartLineItem, CartState, CartStorage, CartStore,
        FileStorage, MemoryStorage, Notification, NotificationLog, Notifier, StorageError,
        TracingNotifier,
    },
    catalog::{ALL_CATEGORIES, Catalog, CatalogError, Category},
    checkout::{
        CardStatus, CheckoutError, CheckoutFlow, CheckoutState, DetailsError, PaymentWidget,
        Route, ShippingDetails, SimulatedPaymentWidget, SubmitOutcome,
    },
    facade::{CartError, CartFacade, CartView},
    pricing::CartTotals,
    products::{Product, ProductId, ProductSpec},
};
