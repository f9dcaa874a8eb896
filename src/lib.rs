pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod identity;
pub mod store;
pub mod uploader;
pub mod view;

pub use error::{AppError, Result};
