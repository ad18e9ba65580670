pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::store::Store;
use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    candidate_service::CandidateService, client_service::ClientService,
    user_service::UserService,
};

/// Shared handler context. Each instance owns its own store, so separate
/// states (e.g. per test) never see each other's data.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub client_service: ClientService,
    pub candidate_service: CandidateService,
    pub application_service: ApplicationService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_store(config, Arc::new(Store::new()))
    }

    pub fn with_store(config: Config, store: Arc<Store>) -> Self {
        let user_service = UserService::new(store.clone());
        let auth_service = AuthService::new(
            user_service.clone(),
            config.jwt_secret.clone(),
            config.token_ttl_hours,
        );
        let client_service = ClientService::new(store.clone());
        let candidate_service = CandidateService::new(store.clone());
        let application_service = ApplicationService::new(store.clone());

        Self {
            config: Arc::new(config),
            store,
            auth_service,
            user_service,
            client_service,
            candidate_service,
            application_service,
        }
    }
}
