//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the expense tracker application.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Error translation from domain to HTTP status codes
//! - Request logging
//!
//! Handlers orchestrate: they fetch through the domain services and hand the
//! data to the pure view builders (reporting, calendar). No business logic
//! lives here.

pub mod calendar_apis;
pub mod export_apis;
pub mod mappers;
pub mod profile_apis;
pub mod report_apis;
pub mod transaction_apis;
