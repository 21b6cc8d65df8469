//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod shorten;
pub mod users;

pub use health::health_handler;
pub use links::link_info_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use users::{create_user_handler, user_links_handler};
