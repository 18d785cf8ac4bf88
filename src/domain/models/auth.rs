use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;

/// Identity subset carried by a session token. Nothing else is embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub iat: usize,
    pub exp: usize,
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        User {
            id: claims.id,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
            password_hash: String::new(),
            created_at: claims.created_at,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    pub token: String,
}
