//! Biblio Library Management System
//!
//! A terminal catalog for books and authors: forms validated on submit,
//! in-memory collections, and update/delete matching on each record's
//! key field (ISBN for books, name for authors).

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod tui;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
