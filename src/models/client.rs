use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::database::store::Record;
use crate::dto::client_dto::{CreateClientPayload, UpdateClientPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Lead,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub contact_person: String,
    pub contact_function: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: ClientStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for Client {
    type New = CreateClientPayload;
    type Patch = UpdateClientPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn build(id: i64, new: CreateClientPayload, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            contact_person: new.contact_person,
            contact_function: new.contact_function,
            email: new.email,
            phone: new.phone,
            address: new.address,
            industry: new.industry,
            status: new.status.unwrap_or_default(),
            notes: new.notes,
            created_at: now,
        }
    }

    // Clients carry no updatedAt, so the timestamp is unused here.
    fn merge(&mut self, patch: UpdateClientPayload, _now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(contact_person) = patch.contact_person {
            self.contact_person = contact_person;
        }
        if patch.contact_function.is_some() {
            self.contact_function = patch.contact_function;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if patch.address.is_some() {
            self.address = patch.address;
        }
        if patch.industry.is_some() {
            self.industry = patch.industry;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if patch.notes.is_some() {
            self.notes = patch.notes;
        }
    }
}
