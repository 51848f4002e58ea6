//! Vendora Dashboard library.
//!
//! The data-access layer behind the admin/seller dashboard: category and
//! subcategory management, store onboarding, and product/variant creation,
//! backed by `PostgreSQL` and gated by role-based authorization.
//!
//! This crate exposes plain-data-in/plain-data-out service functions with no
//! HTTP or UI dependency. The surrounding application owns the identity
//! provider (it constructs [`vendora_core::Actor`] values), the connection
//! pool lifecycle (built once at startup via [`db::create_pool`] and injected
//! into the repositories), and whatever transport invokes the services.
//!
//! # Layers
//!
//! - [`config`] - environment-driven configuration
//! - [`db`] - connection pool, migrations, and per-entity repositories
//! - [`models`] - domain types and upsert payloads
//! - [`services`] - the upsert/validation/slug workflow and accessors
//! - [`error`] - the service-level failure taxonomy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::{ConfigError, DashboardConfig};
pub use db::{RepositoryError, create_pool, run_migrations};
pub use error::ServiceError;
