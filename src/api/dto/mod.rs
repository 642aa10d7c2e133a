//! Request and response DTOs for the HTTP API.

pub mod health;
pub mod links;
pub mod stats;
