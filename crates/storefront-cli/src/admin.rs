use sqlx::PgPool;
use storefront_core::CredentialHasher;
use storefront_models::{SignUpRequest, UserId, UserRole};
use validator::Validate;

/// Inserts an account with the `admin` role.
///
/// The fields go through the same rules as `POST /auth/signUp`. Fails when
/// the username or phone is already taken.
pub async fn create_admin(
    db: &PgPool,
    hasher: &CredentialHasher,
    username: &str,
    phone: &str,
    password: &str,
) -> anyhow::Result<UserId> {
    SignUpRequest {
        username: username.to_string(),
        phone: phone.to_string(),
        password: password.to_string(),
    }
    .validate()?;

    let digest = hasher.hash(password);

    let id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (username, phone, password_digest, role)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT DO NOTHING
         RETURNING id",
    )
    .bind(username)
    .bind(phone)
    .bind(&digest)
    .bind(UserRole::Admin)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| anyhow::anyhow!("user with this username or phone already exists"))
}
