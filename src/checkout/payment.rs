//! Payment widget
//!
//! The card form is owned by an external provider. Checkout only asks whether
//! the widget has loaded and whether its form is complete; card data never
//! passes through this crate.

use std::time::Duration;

/// State of the widget's card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStatus {
    /// The card element could not be found.
    Missing,

    /// The card form is incomplete or invalid.
    Incomplete,

    /// The card form is complete.
    Complete,
}

/// An external payment widget.
pub trait PaymentWidget {
    /// Whether the provider has finished loading.
    fn is_ready(&self) -> bool;

    /// Ask the widget for the state of its card form. May take an arbitrary
    /// amount of time.
    async fn card_status(&self) -> CardStatus;
}

/// A stand-in widget that answers with a fixed card status after a delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPaymentWidget {
    ready: bool,
    status: CardStatus,
    delay: Duration,
}

impl SimulatedPaymentWidget {
    /// A loaded widget reporting `status` after `delay`.
    #[must_use]
    pub fn new(status: CardStatus, delay: Duration) -> Self {
        Self {
            ready: true,
            status,
            delay,
        }
    }

    /// A widget whose provider has not loaded.
    #[must_use]
    pub fn unloaded() -> Self {
        Self {
            ready: false,
            status: CardStatus::Missing,
            delay: Duration::ZERO,
        }
    }
}

impl PaymentWidget for SimulatedPaymentWidget {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn card_status(&self) -> CardStatus {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.status
    }
}
