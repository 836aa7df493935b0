//! Authentication service: registration, login, password changes

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{ApprovalStatus, User, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account; it stays pending until an admin approves it
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        department: Option<&str>,
        phone: Option<&str>,
    ) -> AppResult<User> {
        let password_hash = hash_password(password)?;
        self.repository
            .users
            .create(email, &password_hash, full_name, department, phone)
            .await
    }

    /// Authenticate by email/password and issue a JWT
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        verify_password(password, &user.password_hash)
            .map_err(|_| AppError::Authentication("Invalid email or password".to_string()))?;

        match user.approval_status {
            ApprovalStatus::Approved => {}
            ApprovalStatus::Pending => {
                return Err(AppError::Authentication(
                    "Account is pending admin approval".to_string(),
                ))
            }
            ApprovalStatus::Rejected => {
                return Err(AppError::Authentication(
                    "Account registration was rejected".to_string(),
                ))
            }
        }

        if !user.is_active {
            return Err(AppError::Authentication(
                "User account is deactivated".to_string(),
            ));
        }

        let now = Utc::now();
        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.config.jwt_expiration_hours as i64)).timestamp(),
        };
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok((token, user))
    }

    /// Current user for the `me` endpoint
    pub async fn me(&self, user_id: Uuid) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// Change the caller's password after verifying the current one
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.repository.users.get_by_id(user_id).await?;

        verify_password(current_password, &user.password_hash)
            .map_err(|_| AppError::BadRequest("Current password is incorrect".to_string()))?;

        let password_hash = hash_password(new_password)?;
        self.repository.users.update_password(user_id, &password_hash).await
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> Result<(), argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Argon2::default().verify_password(password.as_bytes(), &parsed)
}
