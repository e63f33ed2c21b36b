//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Shared application state
///
/// All fields are cheap to clone: the pool and the config are internally
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Key expected in the `x-api-key` header
    api_key: Arc<SecretString>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let api_key = Arc::new(SecretString::new(config.auth.api_key.clone()));
        Self {
            db,
            config: Arc::new(config),
            api_key,
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether `candidate` matches the configured API key
    pub fn api_key_matches(&self, candidate: &str) -> bool {
        candidate
            .as_bytes()
            .ct_eq(self.api_key.expose_secret().as_bytes())
            .into()
    }
}
