use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, SimpleObject)]
#[graphql(complex)]
pub struct Client {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
    pub seller_id: String,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn new(input: ClientInput, seller_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            company: input.company.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            phone: input.phone.map(|p| p.trim().to_string()),
            seller_id,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.company.is_empty() {
            return Err(AppError::Validation("Client name and company are required".into()));
        }
        if !self.email.contains('@') {
            return Err(AppError::Validation("Client email is invalid".into()));
        }
        Ok(())
    }

    /// Merges the provided fields. The owning seller is never touched.
    pub fn apply(&mut self, patch: ClientUpdateInput) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(company) = patch.company {
            self.company = company.trim().to_string();
        }
        if let Some(email) = patch.email {
            self.email = email.trim().to_lowercase();
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone.trim().to_string());
        }
    }
}

#[derive(Debug, InputObject)]
pub struct ClientInput {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Default, InputObject)]
pub struct ClientUpdateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
