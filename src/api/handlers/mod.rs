//! HTTP handlers: thin glue between Axum and the application services.

pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;

pub use health::health_handler;
pub use links::{
    OWNER_HEADER, create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
};
pub use redirect::redirect_handler;
pub use stats::{link_clicks_handler, stats_handler};
