pub mod application_service;
pub mod auth_service;
pub mod candidate_service;
pub mod client_service;
pub mod user_service;
