use std::sync::Arc;

use crate::domain::models::{
    client::{Client, ClientInput, ClientUpdateInput},
    user::User,
};
use crate::domain::ports::ClientRepository;
use crate::domain::services::access::ensure_owner;
use crate::error::AppError;
use tracing::info;

pub struct ClientService {
    repo: Arc<dyn ClientRepository>,
}

impl ClientService {
    pub fn new(repo: Arc<dyn ClientRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, caller: &User, input: ClientInput) -> Result<Client, AppError> {
        let client = Client::new(input, caller.id.clone());
        client.validate()?;

        if self.repo.find_by_email(&client.email).await?.is_some() {
            return Err(AppError::Conflict("Client is already registered".into()));
        }

        let created = self.repo.create(&client).await?;
        info!("Seller {} created client {}", caller.id, created.id);
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list().await
    }

    pub async fn list_for_seller(&self, caller: &User) -> Result<Vec<Client>, AppError> {
        self.repo.list_by_seller(&caller.id).await
    }

    pub async fn get(&self, caller: &User, id: &str) -> Result<Client, AppError> {
        let client = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Client not found".into()))?;
        ensure_owner(caller, &client)?;
        Ok(client)
    }

    pub async fn update(&self, caller: &User, id: &str, patch: ClientUpdateInput) -> Result<Client, AppError> {
        let mut client = self.get(caller, id).await?;
        let previous_email = client.email.clone();

        client.apply(patch);
        client.validate()?;

        if client.email != previous_email
            && let Some(other) = self.repo.find_by_email(&client.email).await?
            && other.id != client.id
        {
            return Err(AppError::Conflict("Client email is already registered".into()));
        }

        let updated = self.repo.update(&client).await?;
        info!("Seller {} updated client {}", caller.id, updated.id);
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: &str) -> Result<(), AppError> {
        let client = self.get(caller, id).await?;
        self.repo.delete(&client.id).await?;
        info!("Seller {} deleted client {}", caller.id, client.id);
        Ok(())
    }
}
