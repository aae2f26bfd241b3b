//! Utility functions for alias generation and URL validation.

pub mod alias_generator;
pub mod url_validator;
