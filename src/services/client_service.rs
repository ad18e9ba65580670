use std::sync::Arc;

use crate::database::store::Store;
use crate::dto::client_dto::{CreateClientPayload, UpdateClientPayload};
use crate::error::{Error, Result};
use crate::models::client::{Client, ClientStatus};

#[derive(Clone)]
pub struct ClientService {
    store: Arc<Store>,
}

impl ClientService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<Client>> {
        Ok(self.store.read()?.clients.all())
    }

    pub fn get(&self, id: i64) -> Result<Client> {
        self.store
            .read()?
            .clients
            .get(id)
            .ok_or_else(|| Error::NotFound("Client not found".into()))
    }

    pub fn create(&self, payload: CreateClientPayload) -> Result<Client> {
        let client = self.store.write()?.clients.insert(payload);
        tracing::info!(client_id = client.id, "client created");
        Ok(client)
    }

    /// Registers a prospect; the status is forced to `lead` whatever was sent.
    pub fn create_lead(&self, payload: CreateClientPayload) -> Result<Client> {
        self.create(CreateClientPayload {
            status: Some(ClientStatus::Lead),
            ..payload
        })
    }

    pub fn update(&self, id: i64, payload: UpdateClientPayload) -> Result<Client> {
        self.store
            .write()?
            .clients
            .update(id, payload)
            .ok_or_else(|| Error::NotFound("Client not found".into()))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.store.write()?.clients.remove(id) {
            return Err(Error::NotFound("Client not found".into()));
        }
        Ok(())
    }
}
