//! Alias and record id generation.

use rand::{Rng, distr::Alphanumeric};
use uuid::Uuid;

use crate::error::AppError;

/// Generates a random alias of exactly `length` characters drawn uniformly
/// from `[A-Za-z0-9]`.
///
/// Each call uses the thread-local RNG, so values are independent between
/// calls; never seed this from a fixed value.
///
/// # Errors
///
/// Returns [`AppError::InvalidConfiguration`] when `length` is zero.
pub fn generate_alias(length: usize) -> Result<String, AppError> {
    if length == 0 {
        return Err(AppError::InvalidConfiguration(
            "alias length must be positive".to_string(),
        ));
    }

    let alias = rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect();

    Ok(alias)
}

/// Generates a globally-unique opaque record id.
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}
