pub mod crypto;
pub mod cv_extract;
pub mod time;
pub mod token;
