//! Checkout
//!
//! Collects shipping details, waits on the external payment widget, and
//! clears the cart once the widget reports a complete card form.
//!
//! ```text
//! CollectingDetails ──submit──▶ Submitting ──complete──▶ Success
//!        ▲                          │
//!        └──────── failed ──────────┘ incomplete / invalid / dropped
//! ```
//!
//! A failed submission leaves its message on the flow until the form is
//! edited or submitted again.

use std::cell::RefCell;

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    cart::{CartStorage, Notifier},
    facade::CartFacade,
};

pub mod details;
pub mod payment;

pub use details::{DetailsError, ShippingDetails};
pub use payment::{CardStatus, PaymentWidget, SimulatedPaymentWidget};

/// Shown when the widget cannot find its card element.
pub const PAYMENT_FAILED_MESSAGE: &str = "Payment processing failed. Please try again.";

/// Shown when the card form is incomplete or invalid.
pub const INVALID_CARD_MESSAGE: &str = "Please enter valid card details";

/// Checkout progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// Waiting for the customer to fill in and submit the form.
    CollectingDetails,

    /// Waiting on the payment widget; submit is disabled.
    Submitting,

    /// Payment went through and the cart was cleared.
    Success,
}

/// Where to send the customer after checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Product listing
    Shop,

    /// Payment confirmation
    Success,

    /// Payment cancelled
    Cancel,
}

impl Route {
    /// URL path of the route.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::Shop => "/shop",
            Route::Success => "/payment-success",
            Route::Cancel => "/payment-cancel",
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Navigate away.
    Redirect(Route),

    /// Stay on the form and show the message.
    Rejected(String),

    /// The payment widget has not loaded; nothing happened.
    WidgetNotReady,
}

/// Checkout misuse.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// A submission is already waiting on the payment widget.
    #[error("a payment is already being processed")]
    AlreadySubmitting,

    /// This checkout has already succeeded.
    #[error("checkout has already completed")]
    Completed,
}

/// One checkout session.
///
/// State lives behind interior mutability so the form can be read (for
/// example to disable the submit button) while a submission is suspended.
#[derive(Debug)]
pub struct CheckoutFlow {
    state: RefCell<CheckoutState>,
    details: RefCell<ShippingDetails>,
    error: RefCell<Option<String>>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// A new session with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::with_details(ShippingDetails::default())
    }

    /// A new session with the form pre-filled.
    #[must_use]
    pub fn with_details(details: ShippingDetails) -> Self {
        Self {
            state: RefCell::new(CheckoutState::CollectingDetails),
            details: RefCell::new(details),
            error: RefCell::new(None),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state.borrow().clone()
    }

    /// Whether a submission is waiting on the payment widget.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(*self.state.borrow(), CheckoutState::Submitting)
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(*self.state.borrow(), CheckoutState::CollectingDetails)
    }

    /// The inline error left by the last failed submission.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    /// Current form contents.
    #[must_use]
    pub fn details(&self) -> ShippingDetails {
        self.details.borrow().clone()
    }

    /// Replace the form contents, clearing any previous error.
    pub fn set_details(&self, details: ShippingDetails) {
        *self.details.borrow_mut() = details;
        self.error.replace(None);
    }

    /// Amount the customer will be charged. Shipping is free.
    pub fn amount_due<S: CartStorage, N: Notifier>(
        &self,
        cart: &CartFacade<S, N>,
    ) -> Money<'static, Currency> {
        cart.subtotal()
    }

    /// Abandon checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitting`] while waiting on the
    /// widget, or [`CheckoutError::Completed`] after success.
    pub fn cancel(&self) -> Result<Route, CheckoutError> {
        self.guard()?;

        Ok(Route::Cancel)
    }

    /// Submit the form.
    ///
    /// An empty cart redirects to the shop and an unloaded widget does
    /// nothing. Otherwise the details are validated, the widget is asked for
    /// its card status, and on a complete card the cart is cleared and the
    /// customer is sent to the success route.
    ///
    /// Dropping the returned future while it waits on the widget puts the
    /// flow back to collecting details, so it can be submitted again.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitting`] if called again while a
    /// submission is suspended, or [`CheckoutError::Completed`] after success.
    #[tracing::instrument(name = "checkout.submit", skip_all, err)]
    pub async fn submit<S, N, W>(
        &self,
        cart: &CartFacade<S, N>,
        widget: &W,
    ) -> Result<SubmitOutcome, CheckoutError>
    where
        S: CartStorage,
        N: Notifier,
        W: PaymentWidget,
    {
        self.guard()?;

        if cart.is_empty() {
            return Ok(SubmitOutcome::Redirect(Route::Shop));
        }

        if !widget.is_ready() {
            return Ok(SubmitOutcome::WidgetNotReady);
        }

        self.error.replace(None);

        let validated = self.details.borrow().validate();

        if let Err(error) = validated {
            return Ok(self.fail(error.to_string()));
        }

        let pending = Pending::start(&self.state);
        let status = widget.card_status().await;

        drop(pending);

        match status {
            CardStatus::Complete => {
                cart.clear_cart();
                self.state.replace(CheckoutState::Success);

                info!("checkout succeeded");

                Ok(SubmitOutcome::Redirect(Route::Success))
            }
            CardStatus::Incomplete => Ok(self.fail(INVALID_CARD_MESSAGE.to_string())),
            CardStatus::Missing => Ok(self.fail(PAYMENT_FAILED_MESSAGE.to_string())),
        }
    }

    fn guard(&self) -> Result<(), CheckoutError> {
        match *self.state.borrow() {
            CheckoutState::Submitting => Err(CheckoutError::AlreadySubmitting),
            CheckoutState::Success => Err(CheckoutError::Completed),
            CheckoutState::CollectingDetails => Ok(()),
        }
    }

    fn fail(&self, message: String) -> SubmitOutcome {
        warn!(%message, "checkout rejected");

        self.state.replace(CheckoutState::CollectingDetails);
        self.error.replace(Some(message.clone()));

        SubmitOutcome::Rejected(message)
    }
}

/// Holds the flow in [`CheckoutState::Submitting`] while the widget is
/// awaited, and puts it back to collecting details when released.
struct Pending<'a> {
    state: &'a RefCell<CheckoutState>,
}

impl<'a> Pending<'a> {
    fn start(state: &'a RefCell<CheckoutState>) -> Self {
        state.replace(CheckoutState::Submitting);

        Self { state }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };

        if *state == CheckoutState::Submitting {
            *state = CheckoutState::CollectingDetails;
        }
    }
}
