//! Link store implementations and startup backend selection.
//!
//! - [`PgLinkStore`] - durable PostgreSQL backend
//! - [`MemoryLinkStore`] - in-process fallback, lost on restart
//! - [`connect_store`] - one-shot probe-and-select factory run at startup

pub mod backend;
pub mod memory_link_store;
pub mod pg_link_store;

pub use backend::{StorageBackend, connect_store};
pub use memory_link_store::MemoryLinkStore;
pub use pg_link_store::PgLinkStore;
