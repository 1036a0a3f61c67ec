//! # Storefront Models
//!
//! Domain models and DTOs shared by the API server and the CLI.
//!
//! - [`ids`]: strongly-typed UUID newtypes
//! - [`users`]: stored credentials, roles and sign-up payloads
//! - [`auth`]: sign-in and token payloads
//! - [`catalog`]: categories, products and search parameters

pub mod auth;
pub mod catalog;
pub mod ids;
pub mod users;

pub use auth::{RefreshTokenRequest, SignInRequest, TokenPair};
pub use catalog::{
    Category, CreateCategoryDto, CreateProductDto, NewProduct, Product, ProductRow, SearchParams,
    VisibilityDto,
};
pub use ids::{CategoryId, ProductId, UserId};
pub use users::{AdminSignUpRequest, NewUser, SignUpRequest, User, UserResponse, UserRole};
