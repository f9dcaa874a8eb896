pub mod admin;
pub mod admins;
pub mod auth;
pub mod public;
pub mod root;
pub mod singletons;
