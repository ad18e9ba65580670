pub mod application;
pub mod candidate;
pub mod client;
pub mod profile;
pub mod user;
