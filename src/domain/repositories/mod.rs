//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; concrete backends live in
//! `crate::infrastructure::persistence` and are selected by a factory at
//! startup. Mock implementations are auto-generated via `mockall` for
//! testing.

pub mod short_url_repository;

pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
