use std::sync::Arc;

use crate::domain::models::{
    auth::Token,
    user::{AuthenticateInput, User, UserInput},
};
use crate::domain::ports::UserRepository;
use crate::domain::services::auth_service::{check_password, hash_password, AuthService};
use crate::error::AppError;
use tracing::{info, warn};

const MIN_PASSWORD_LEN: usize = 6;

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, auth: Arc<AuthService>) -> Self {
        Self { repo, auth }
    }

    pub async fn register(&self, input: UserInput) -> Result<User, AppError> {
        let email = input.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(AppError::Validation("Email is invalid".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("User is already registered".into()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(
            input.first_name.trim().to_string(),
            input.last_name.trim().to_string(),
            email,
            password_hash,
        );
        let created = self.repo.create(&user).await?;

        info!("Registered user: {}", created.id);
        Ok(created)
    }

    pub async fn authenticate(&self, input: AuthenticateInput) -> Result<Token, AppError> {
        let email = input.email.trim().to_lowercase();
        let user = self.repo.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login attempt for unknown email");
            AppError::AuthInvalid("Invalid email or password".into())
        })?;

        if !check_password(&input.password, &user.password_hash) {
            warn!("Wrong password for user {}", user.id);
            return Err(AppError::AuthInvalid("Invalid email or password".into()));
        }

        let token = self.auth.issue_token(&user)?;
        info!("User authenticated: {}", user.id);
        Ok(Token { token })
    }

    /// Identity embedded in a token, without touching the store.
    pub fn user_from_token(&self, token: &str) -> Result<User, AppError> {
        Ok(self.auth.verify_token(token)?.into())
    }

    pub async fn get(&self, id: &str) -> Result<User, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
