//! HTTP handlers for the JSON API and redirect endpoint.

pub mod delete;
pub mod health;
pub mod redirect;
pub mod shorten;

pub use delete::delete_urls_handler;
pub use health::ping_handler;
pub use redirect::redirect_handler;
pub use shorten::{batch_shorten_handler, shorten_handler};
