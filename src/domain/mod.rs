//! Domain layer: business entities, the storage abstraction and click tracking.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`store`] - The dual-backend storage trait
//! - [`click_event`] - Click message passed to the background worker
//! - [`click_worker`] - Asynchronous click recording
//!
//! # Click processing flow
//!
//! 1. The redirect handler resolves a slug and responds with 307
//! 2. A [`click_event::ClickMessage`] is sent to a bounded channel (non-blocking)
//! 3. [`click_worker::run_click_worker`] classifies the device, normalizes the
//!    referrer and persists via [`store::LinkStore`] under a timeout

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod store;
