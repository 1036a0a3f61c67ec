use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use tracing::{info, instrument, warn};

use storefront_auth::{TokenCodec, TokenError, TokenPurpose, VerifiedSubject};
use storefront_config::{AppConfig, ConfigError};
use storefront_core::CredentialHasher;
use storefront_models::{
    AdminSignUpRequest, NewUser, SignUpRequest, TokenPair, UserId, UserResponse, UserRole,
};

use crate::metrics::{
    track_login_failure, track_login_success, track_tokens_issued, track_user_created,
};
use crate::store::{StoreError, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("stored role does not match the claimed role")]
    RoleMismatch,

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("store failure")]
    Store(#[source] StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists => AuthError::AlreadyExists,
            other => AuthError::Store(other),
        }
    }
}

/// Credential as submitted, before hashing.
pub struct NewCredential {
    pub username: String,
    pub phone: String,
    pub password: String,
    pub role: UserRole,
}

impl fmt::Debug for NewCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewCredential")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl From<SignUpRequest> for NewCredential {
    fn from(dto: SignUpRequest) -> Self {
        Self {
            username: dto.username,
            phone: dto.phone,
            password: dto.password,
            role: UserRole::User,
        }
    }
}

impl From<AdminSignUpRequest> for NewCredential {
    fn from(dto: AdminSignUpRequest) -> Self {
        Self {
            username: dto.username,
            phone: dto.phone,
            password: dto.password,
            role: UserRole::Admin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub role: UserRole,
}

/// Credential creation, sign-in, token minting and admin confirmation.
///
/// Token issue and verify never touch the store. Only `create_user`,
/// `authenticate` and `confirm_role` await.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl fmt::Debug for AuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: CredentialHasher,
        codec: TokenCodec,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(users: Arc<dyn UserStore>, config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            users,
            CredentialHasher::from_config(&config.password)?,
            TokenCodec::from_config(&config.jwt),
            Duration::seconds(config.jwt.access_token_expiry),
            Duration::seconds(config.jwt.refresh_token_expiry),
        ))
    }

    #[instrument(skip(self), fields(username = %credential.username, role = %credential.role))]
    pub async fn create_user(&self, credential: NewCredential) -> Result<UserResponse, AuthError> {
        let new_user = NewUser {
            password_digest: self.hasher.hash(&credential.password),
            username: credential.username,
            phone: credential.phone,
            role: credential.role,
        };

        let user = self.users.insert_user(new_user).await?;
        track_user_created(user.role.as_str());
        info!(user_id = %user.id, "User created");

        Ok(UserResponse::from(user))
    }

    /// Wrong username and wrong password both yield [`AuthError::NotFound`].
    #[instrument(skip(self, password))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let digest = self.hasher.hash(password);

        match self.users.find_by_credentials(username, &digest).await? {
            Some(user) => {
                track_login_success(user.role.as_str());
                Ok(AuthenticatedUser {
                    id: user.id,
                    role: user.role,
                })
            }
            None => {
                track_login_failure("invalid_credentials");
                Err(AuthError::NotFound)
            }
        }
    }

    pub fn issue_token_pair(&self, subject: &str, role: &str) -> Result<TokenPair, AuthError> {
        let access_token = self
            .codec
            .issue(subject, role, TokenPurpose::Access, self.access_ttl)?;
        let refresh_token = self
            .codec
            .issue(subject, role, TokenPurpose::Refresh, self.refresh_ttl)?;

        track_tokens_issued(TokenPurpose::Access.as_str());
        track_tokens_issued(TokenPurpose::Refresh.as_str());

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mints a fresh pair from a refresh token. The presented token stays
    /// valid until it expires.
    pub fn refresh_token_pair(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let verified = self.codec.verify(refresh_token, TokenPurpose::Refresh)?;
        self.issue_token_pair(&verified.subject, &verified.role)
    }

    pub fn verify_access(&self, token: &str) -> Result<VerifiedSubject, AuthError> {
        Ok(self.codec.verify(token, TokenPurpose::Access)?)
    }

    /// Confirms the store still holds `claimed` as the user's role.
    #[instrument(skip(self))]
    pub async fn confirm_role(&self, user_id: UserId, claimed: &str) -> Result<(), AuthError> {
        match self.users.find_role(user_id).await? {
            Some(stored) if stored.as_str() == claimed => Ok(()),
            Some(stored) => {
                warn!(stored = %stored, claimed, "Role claim no longer matches the store");
                Err(AuthError::RoleMismatch)
            }
            None => {
                warn!("Token subject no longer exists");
                Err(AuthError::RoleMismatch)
            }
        }
    }
}
