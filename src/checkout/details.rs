//! Shipping details

use thiserror::Error;

/// Why shipping details were rejected. The messages are shown to the user.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DetailsError {
    /// Name is blank.
    #[error("Please enter your full name")]
    MissingName,

    /// Email is blank.
    #[error("Please enter your email")]
    MissingEmail,

    /// Email does not look like an address.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Shipping address is blank.
    #[error("Please enter a shipping address")]
    MissingAddress,
}

/// Customer details collected before payment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    /// Full name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Shipping address
    pub address: String,
}

impl ShippingDetails {
    /// Create shipping details.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Check every field is filled in and the email is plausible.
    ///
    /// # Errors
    ///
    /// Returns the first [`DetailsError`] found, checking fields in form order.
    pub fn validate(&self) -> Result<(), DetailsError> {
        if self.name.trim().is_empty() {
            return Err(DetailsError::MissingName);
        }

        let email = self.email.trim();

        if email.is_empty() {
            return Err(DetailsError::MissingEmail);
        }

        if !is_plausible_email(email) {
            return Err(DetailsError::InvalidEmail);
        }

        if self.address.trim().is_empty() {
            return Err(DetailsError::MissingAddress);
        }

        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
}
