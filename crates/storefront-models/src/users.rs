//! Stored credentials and the payloads that create them.

use serde::{Deserialize, Serialize};
use sqlx::{Database, Decode, Encode, FromRow, Type, postgres::PgTypeInfo};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::ids::UserId;

/// Access level of a credential. Set once at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

// Stored as plain text.
impl Type<sqlx::Postgres> for UserRole {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <String as Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, sqlx::Postgres> for UserRole {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for UserRole {
    fn decode(
        value: <sqlx::Postgres as Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as Decode<'r, sqlx::Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

/// A stored credential.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub phone: String,
    pub password_digest: String,
    pub role: UserRole,
}

/// A credential about to be inserted. The password is already digested.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub phone: String,
    pub password_digest: String,
    pub role: UserRole,
}

/// Public view of a credential. Never carries the password or its digest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub phone: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            phone: user.phone,
            role: user.role,
        }
    }
}

fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric")
            .with_message(Cow::Borrowed("username must contain only letters and digits")))
    }
}

fn numeric(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric")
            .with_message(Cow::Borrowed("phone must contain only digits")))
    }
}

/// Payload of `POST /auth/signUp`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(
        length(min = 1, max = 150, message = "username is required"),
        custom(function = "alphanumeric")
    )]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(
        length(min = 1, max = 150, message = "phone is required"),
        custom(function = "numeric")
    )]
    #[schema(example = "79001234567")]
    pub phone: String,
    #[validate(length(
        min = 7,
        max = 50,
        message = "password length must be from 7 to 50 characters"
    ))]
    #[schema(example = "password123")]
    pub password: String,
}

/// Payload of `POST /auth/admin`: a sign-up plus the provisioning code.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminSignUpRequest {
    #[validate(
        length(min = 1, max = 150, message = "username is required"),
        custom(function = "alphanumeric")
    )]
    pub username: String,
    #[validate(
        length(min = 1, max = 150, message = "phone is required"),
        custom(function = "numeric")
    )]
    pub phone: String,
    #[validate(length(
        min = 7,
        max = 50,
        message = "password length must be from 7 to 50 characters"
    ))]
    pub password: String,
    #[validate(length(min = 1, message = "code is required"))]
    pub code: String,
}
