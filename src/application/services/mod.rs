//! Application services orchestrating domain logic over storage.

pub mod short_url_service;

pub use short_url_service::{
    BatchSaveRequest, BatchSaveResult, ShortUrlService, ShortUrlSettings,
};
