//! Cart notifications
//!
//! User-visible messages raised by cart mutations.

use std::{cell::RefCell, rc::Rc};

use tracing::info;

/// A user-visible cart message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A product was added as a new line item.
    Added {
        /// Product name
        product_name: String,
    },

    /// The quantity of an existing line item was increased.
    Updated {
        /// Product name
        product_name: String,
    },

    /// A line item was removed.
    Removed {
        /// Product name
        product_name: String,
    },

    /// Every line item was removed.
    Cleared,
}

impl Notification {
    /// Headline text.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Notification::Added { .. } => "Added to your cart",
            Notification::Updated { .. } => "Updated quantity in your cart",
            Notification::Removed { .. } => "Removed from your cart",
            Notification::Cleared => "Your cart has been cleared",
        }
    }

    /// Secondary text, the product name where there is one.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Notification::Added { product_name }
            | Notification::Updated { product_name }
            | Notification::Removed { product_name } => Some(product_name),
            Notification::Cleared => None,
        }
    }
}

/// Receives cart notifications.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Present a notification to the user.
    fn notify(&self, notification: &Notification);
}

/// Emits notifications as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        info!(
            description = notification.description(),
            "{}",
            notification.message()
        );
    }
}

/// Records notifications in memory.
///
/// Clones share the same log, so one handle can be given to a store and
/// another kept to read what was raised.
#[derive(Debug, Default, Clone)]
pub struct NotificationLog {
    entries: Rc<RefCell<Vec<Notification>>>,
}

impl NotificationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications recorded so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    /// Remove and return every recorded notification.
    pub fn drain(&self) -> Vec<Notification> {
        self.entries.borrow_mut().drain(..).collect()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: &Notification) {
        self.entries.borrow_mut().push(notification.clone());
    }
}
