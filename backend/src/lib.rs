//! Motivate backend library
//!
//! Exposes the server modules for the binaries and the integration tests.

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
