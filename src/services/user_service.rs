use std::sync::Arc;

use crate::config::Config;
use crate::database::store::{Store, Tables};
use crate::dto::user_dto::{CreateUserPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, User, UserPatch, UserRole};
use crate::utils::crypto::hash_password;

#[derive(Clone)]
pub struct UserService {
    store: Arc<Store>,
}

fn email_taken(tables: &Tables, email: &str, except: Option<i64>) -> bool {
    tables
        .users
        .find(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
        .is_some()
}

fn username_taken(tables: &Tables, username: &str, except: Option<i64>) -> bool {
    tables
        .users
        .find(|u| Some(u.id) != except && u.username.eq_ignore_ascii_case(username))
        .is_some()
}

impl UserService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<User>> {
        Ok(self.store.read()?.users.all())
    }

    pub fn get(&self, id: i64) -> Result<User> {
        self.store
            .read()?
            .users
            .get(id)
            .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim();
        Ok(self
            .store
            .read()?
            .users
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    pub fn create(&self, payload: CreateUserPayload) -> Result<User> {
        // Hash before taking the lock; argon2 is deliberately slow.
        let password_hash = hash_password(&payload.password)?;
        let username = payload.username.trim().to_string();
        let email = payload.email.trim().to_string();

        let mut tables = self.store.write()?;
        if username_taken(&tables, &username, None) {
            tracing::warn!(username = %username, "rejected duplicate username");
            return Err(Error::Conflict("Username is already in use".into()));
        }
        if email_taken(&tables, &email, None) {
            tracing::warn!(email = %email, "rejected duplicate user email");
            return Err(Error::Conflict("Email is already in use".into()));
        }

        let user = tables.users.insert(NewUser {
            username,
            email,
            password_hash,
            first_name: payload.first_name,
            last_name: payload.last_name,
            role: payload.role.unwrap_or_default(),
            password_change_required: payload.password_change_required.unwrap_or(true),
        });
        tracing::info!(user_id = user.id, role = user.role.as_str(), "user created");
        Ok(user)
    }

    pub fn update(&self, id: i64, payload: UpdateUserPayload) -> Result<User> {
        let password_hash = payload.password.as_deref().map(hash_password).transpose()?;
        let username = payload.username.map(|u| u.trim().to_string());
        let email = payload.email.map(|e| e.trim().to_string());

        let mut tables = self.store.write()?;
        if tables.users.get(id).is_none() {
            return Err(Error::NotFound("User not found".into()));
        }
        if let Some(username) = &username {
            if username_taken(&tables, username, Some(id)) {
                return Err(Error::Conflict("Username is already in use".into()));
            }
        }
        if let Some(email) = &email {
            if email_taken(&tables, email, Some(id)) {
                return Err(Error::Conflict("Email is already in use".into()));
            }
        }

        tables
            .users
            .update(
                id,
                UserPatch {
                    username,
                    email,
                    password_hash,
                    first_name: payload.first_name,
                    last_name: payload.last_name,
                    role: payload.role,
                    password_change_required: payload.password_change_required,
                },
            )
            .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    /// Replaces the stored hash and clears the forced-rotation flag.
    pub fn set_password(&self, id: i64, new_password: &str) -> Result<User> {
        let password_hash = hash_password(new_password)?;
        self.store
            .write()?
            .users
            .update(
                id,
                UserPatch {
                    password_hash: Some(password_hash),
                    password_change_required: Some(false),
                    ..Default::default()
                },
            )
            .ok_or_else(|| Error::NotFound("User not found".into()))
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if !self.store.write()?.users.remove(id) {
            return Err(Error::NotFound("User not found".into()));
        }
        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Creates the bootstrap admin from config unless an account with that
    /// email already exists. The seeded admin must rotate its password.
    pub fn seed_admin(&self, config: &Config) -> Result<Option<User>> {
        let Some(password) = config.admin_password.as_deref() else {
            return Ok(None);
        };
        if self.find_by_email(&config.admin_email)?.is_some() {
            return Ok(None);
        }

        let admin = self.create(CreateUserPayload {
            username: config.admin_username.clone(),
            email: config.admin_email.clone(),
            password: password.to_string(),
            first_name: "System".into(),
            last_name: "Administrator".into(),
            role: Some(UserRole::Admin),
            password_change_required: Some(true),
        })?;
        tracing::info!(user_id = admin.id, "seeded admin account");
        Ok(Some(admin))
    }
}
