//! Feature modules. Each has `controller.rs` (HTTP handlers), `service.rs`
//! (business logic) and `router.rs` (route wiring).

pub mod auth;
pub mod catalog;
