//! # Storefront Core
//!
//! Foundational types shared by every Storefront crate:
//!
//! - [`errors`]: the HTTP-facing [`AppError`] and its [`ErrorKind`] taxonomy
//! - [`password`]: deterministic salted credential digests
//!
//! # Example
//!
//! ```ignore
//! use storefront_core::{AppError, CredentialHasher};
//!
//! let hasher = CredentialHasher::new("process-wide-salt")?;
//! let digest = hasher.hash("hunter22");
//!
//! let error = AppError::not_found(anyhow::anyhow!("product not found"));
//! ```

pub mod errors;
pub mod password;

pub use errors::{AppError, ErrorKind, ErrorResponse};
pub use password::CredentialHasher;
