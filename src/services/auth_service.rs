//! Authentication service

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    models::User,
    utils::validation::validate_user_name,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Register a new user
    pub async fn register(
        pool: &PgPool,
        name: &str,
        email: &str,
        password: &str,
        nickname: Option<&str>,
    ) -> AppResult<User> {
        validate_user_name(name).map_err(|e| AppError::Validation(e.to_string()))?;

        if UserRepository::find_by_name(pool, name).await?.is_some() {
            return Err(AppError::AlreadyExists("User name already taken".to_string()));
        }

        if UserRepository::find_by_email(pool, email).await?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let password_hash = Self::hash_password(password)?;
        let user = UserRepository::create(pool, name, email, &password_hash, nickname).await?;

        info!(user_id = %user.id, name = %user.name, "user registered");
        Ok(user)
    }

    /// Login with name/email and password; the user is marked online
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtConfig,
        identifier: &str,
        password: &str,
    ) -> AppResult<(User, String, i64)> {
        let user = UserRepository::find_by_identifier(pool, identifier)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        UserRepository::mark_logged_in(pool, &user.id).await?;

        let (access_token, expires_in) = Self::generate_access_token(&user, jwt)?;
        info!(user_id = %user.id, "user logged in");

        Ok((user, access_token, expires_in))
    }

    /// Mark the user offline
    pub async fn logout(pool: &PgPool, user_id: &Uuid) -> AppResult<()> {
        UserRepository::mark_offline(pool, user_id).await?;
        info!(user_id = %user_id, "user logged out");
        Ok(())
    }

    /// Verify JWT token and extract claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate access token
    fn generate_access_token(user: &User, jwt: &JwtConfig) -> AppResult<(String, i64)> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(jwt.expiry_hours);
        let expires_in = jwt.expiry_hours * 3600;

        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token generation failed: {}", e)))?;

        Ok((token, expires_in))
    }
}
