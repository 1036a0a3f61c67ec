//! Access control for protected routes.
//!
//! - [`auth`]: bearer extraction, access-token validation and the [`auth::AuthUser`] extractor
//! - [`role`]: admin gate that re-confirms the role claim against the store
//!
//! # Flow
//!
//! 1. The `Authorization` header must split on single spaces into exactly two parts
//! 2. The second part must verify as an access token
//! 3. Admin routes additionally require the `admin` role claim
//! 4. ...and the store must still hold `admin` for the token's subject
//! 5. [`auth::AuthUser`] is inserted into the request extensions
//!
//! Failures in steps 1 and 2 answer 401 `unauthenticated`; steps 3 and 4
//! answer 401 `credential error`.

pub mod auth;
pub mod role;
