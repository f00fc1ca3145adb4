//! Authentication service for farmer registration, login, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::locations;
use shared::models::BadgeKind;
use shared::types::Language;
use shared::validation::{normalize_bd_phone, validate_password};

use crate::config::Config;
use crate::error::{AppError, AppResult};

use super::award_badge;

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt_secret: String,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

/// Input for registering a new farmer account
#[derive(Debug, Deserialize)]
pub struct RegisterFarmerInput {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub division: String,
    pub district: String,
    pub preferred_language: Option<Language>,
}

/// Response after successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub farmer_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Farmer ID
    pub exp: i64,
    pub iat: i64,
}

/// Authentication tokens
#[derive(Debug, Serialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Farmer credentials from database
#[derive(Debug, sqlx::FromRow)]
struct FarmerRow {
    id: Uuid,
    password_hash: String,
    is_active: bool,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            jwt_secret: config.jwt.secret.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
        }
    }

    /// Register a new farmer account
    pub async fn register_farmer(&self, input: RegisterFarmerInput) -> AppResult<RegisterResponse> {
        let phone = normalize_bd_phone(&input.phone).map_err(|msg| AppError::Validation {
            field: "phone".to_string(),
            message: msg.to_string(),
            message_bn: "ফোন নম্বর সঠিক নয়".to_string(),
        })?;

        validate_password(&input.password).map_err(|msg| AppError::Validation {
            field: "password".to_string(),
            message: msg.to_string(),
            message_bn: "পাসওয়ার্ড কমপক্ষে ৮ অক্ষরের হতে হবে".to_string(),
        })?;

        let district = locations::find_district(&input.division, &input.district)
            .ok_or_else(|| AppError::NotFound("District".to_string()))?;
        let division = locations::find_division(&input.division)
            .ok_or_else(|| AppError::NotFound("Division".to_string()))?;

        // Check for an existing account on this phone
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE phone = $1")
                .bind(&phone)
                .fetch_one(&self.db)
                .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "farmer".to_string(),
                message: "An account with this phone number already exists".to_string(),
                message_bn: "এই ফোন নম্বর দিয়ে ইতিমধ্যে অ্যাকাউন্ট আছে".to_string(),
            });
        }

        // Hash password
        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let language = input.preferred_language.unwrap_or_default();

        let farmer_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO farmers (name, phone, password_hash, division, district, preferred_language)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&phone)
        .bind(&password_hash)
        .bind(division.name)
        .bind(district.name)
        .bind(language.code())
        .fetch_one(&self.db)
        .await?;

        // Registration earns the first badge
        award_badge(&self.db, farmer_id, BadgeKind::FirstHarvest).await?;

        // Generate tokens
        let tokens = self.generate_tokens(farmer_id)?;

        // Store refresh token
        self.store_refresh_token(farmer_id, &tokens.refresh_token)
            .await?;

        Ok(RegisterResponse {
            farmer_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
        })
    }

    /// Authenticate a farmer with phone and password
    pub async fn login(&self, phone: &str, password: &str) -> AppResult<AuthTokens> {
        let phone = normalize_bd_phone(phone).map_err(|_| AppError::InvalidCredentials)?;

        let farmer = sqlx::query_as::<_, FarmerRow>(
            "SELECT id, password_hash, is_active FROM farmers WHERE phone = $1",
        )
        .bind(&phone)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        if !farmer.is_active {
            return Err(AppError::Unauthorized {
                message: "Account is disabled".to_string(),
                message_bn: "অ্যাকাউন্ট বন্ধ করা হয়েছে".to_string(),
            });
        }

        // Verify password
        let valid = verify(password, &farmer.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        // Update last login
        sqlx::query("UPDATE farmers SET last_login_at = NOW() WHERE id = $1")
            .bind(farmer.id)
            .execute(&self.db)
            .await?;

        // Generate tokens
        let tokens = self.generate_tokens(farmer.id)?;

        // Store refresh token
        self.store_refresh_token(farmer.id, &tokens.refresh_token)
            .await?;

        Ok(tokens)
    }

    /// Refresh access token using a refresh token
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthTokens> {
        let token_hash = Self::hash_token(refresh_token);

        let farmer_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT rt.farmer_id
            FROM refresh_tokens rt
            JOIN farmers f ON f.id = rt.farmer_id
            WHERE rt.token_hash = $1
              AND rt.expires_at > NOW()
              AND rt.revoked_at IS NULL
              AND f.is_active = true
            "#,
        )
        .bind(&token_hash)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid or expired refresh token".to_string(),
            message_bn: "রিফ্রেশ টোকেন সঠিক নয় বা মেয়াদ শেষ".to_string(),
        })?;

        // Revoke old refresh token
        sqlx::query("UPDATE refresh_tokens SET revoked_at = NOW() WHERE token_hash = $1")
            .bind(&token_hash)
            .execute(&self.db)
            .await?;

        // Generate new tokens
        let tokens = self.generate_tokens(farmer_id)?;

        // Store new refresh token
        self.store_refresh_token(farmer_id, &tokens.refresh_token)
            .await?;

        Ok(tokens)
    }

    /// Validate access token and return claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Generate access and refresh tokens
    fn generate_tokens(&self, farmer_id: Uuid) -> AppResult<AuthTokens> {
        let now = Utc::now();
        let access_exp = now + Duration::seconds(self.access_token_expiry);

        let access_claims = Claims {
            sub: farmer_id.to_string(),
            exp: access_exp.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &access_claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        // Refresh token (simple random token)
        let refresh_token = Uuid::new_v4().to_string();

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Store refresh token in database
    async fn store_refresh_token(&self, farmer_id: Uuid, token: &str) -> AppResult<()> {
        let token_hash = Self::hash_token(token);
        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_expiry);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (farmer_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(farmer_id)
        .bind(&token_hash)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Hash a token for storage
    fn hash_token(token: &str) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_stable() {
        let a = AuthService::hash_token("some-refresh-token");
        let b = AuthService::hash_token("some-refresh-token");
        assert_eq!(a, b);
    }

    #[test]
    fn token_hash_differs_per_token() {
        let a = AuthService::hash_token("token-one");
        let b = AuthService::hash_token("token-two");
        assert_ne!(a, b);
    }
}
