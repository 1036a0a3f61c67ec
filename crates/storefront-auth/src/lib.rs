//! # Storefront Auth
//!
//! Signed, expiring, purpose-scoped bearer tokens.
//!
//! - [`claims`]: the signed payload ([`TokenClaims`]) and [`TokenPurpose`]
//! - [`jwt`]: [`TokenCodec`], which issues and verifies HS256 tokens
//!
//! Every token names what it may be used for. An access token is presented on
//! each request; a refresh token is only good for minting a new pair. A token
//! presented for the other use is rejected with [`TokenError::WrongPurpose`].
//!
//! # Example
//!
//! ```ignore
//! use storefront_auth::{TokenCodec, TokenPurpose};
//!
//! let codec = TokenCodec::new("signing-secret");
//! let token = codec.issue(&user_id.to_string(), "admin", TokenPurpose::Access, chrono::Duration::minutes(30))?;
//! let subject = codec.verify(&token, TokenPurpose::Access)?;
//! assert_eq!(subject.role, "admin");
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{TokenClaims, TokenPurpose, VerifiedSubject};
pub use jwt::{TokenCodec, TokenError};
