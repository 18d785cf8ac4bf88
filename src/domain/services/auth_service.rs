use crate::config::Config;
use crate::domain::models::{auth::Claims, user::User};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use tracing::{debug, error};

/// Issues and verifies the HS256 session tokens handed out by `authenticateUser`.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(secret: &str, token_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            token_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours))
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            iat: now.timestamp() as usize,
            exp: (now + self.token_ttl).timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            error!("JWT encoding failed: {}", e);
            AppError::Internal
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                AppError::AuthInvalid("Invalid or expired token".into())
            })
    }
}

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))
}

pub fn check_password(plain: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        error!("Stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new("Ana".into(), "Lopez".into(), "ana@example.com".into(), String::new())
    }

    #[test]
    fn issued_token_carries_identity_subset() {
        let service = AuthService::new("test-secret", Duration::hours(24));
        let user = user();

        let token = service.issue_token(&user).unwrap();
        let claims = service.verify_token(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.first_name, "Ana");
        assert_eq!(claims.last_name, "Lopez");
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.created_at.timestamp(), user.created_at.timestamp());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_foreign_signature() {
        let issuer = AuthService::new("secret-a", Duration::hours(1));
        let verifier = AuthService::new("secret-b", Duration::hours(1));

        let token = issuer.issue_token(&user()).unwrap();
        assert!(matches!(verifier.verify_token(&token), Err(AppError::AuthInvalid(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let service = AuthService::new("test-secret", Duration::hours(-2));
        let token = service.issue_token(&user()).unwrap();
        assert!(matches!(service.verify_token(&token), Err(AppError::AuthInvalid(_))));
    }

    #[test]
    fn rejects_garbage() {
        let service = AuthService::new("test-secret", Duration::hours(1));
        assert!(service.verify_token("not.a.jwt").is_err());
    }

    #[test]
    fn password_hash_is_salted_and_verifiable() {
        let first = hash_password("hunter22").unwrap();
        let second = hash_password("hunter22").unwrap();

        assert_ne!(first, "hunter22");
        assert_ne!(first, second);
        assert!(check_password("hunter22", &first));
        assert!(!check_password("hunter23", &first));
        assert!(!check_password("hunter22", "plaintext"));
    }
}
