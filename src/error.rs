//! Typed failures that callers may want to match on. Everything else travels
//! as `anyhow::Error` with context attached.

use thiserror::Error;

use crate::models::MonkeyId;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Monkey {0} not found.")]
    NotFound(MonkeyId),
    #[error("Unknown species `{0}`.")]
    UnknownSpecies(String),
}

/// Reasons a form submission is rejected before reaching the gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter the monkey's name!")]
    MissingName,
    #[error("Please select a species!")]
    MissingSpecies,
    #[error("Age must be a whole number of years.")]
    InvalidAge,
}
