//! Storefront
//!
//! Product catalog, shopping cart and checkout for a small online shop. The
//! cart persists to a single key/value entry, derives its totals from its
//! line items on every change, and is cleared once the external payment
//! widget reports a completed card form.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod display;
pub mod facade;
pub mod prelude;
pub mod pricing;
pub mod products;
