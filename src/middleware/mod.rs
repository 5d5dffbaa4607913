//! HTTP middleware components.

/// Identity token authentication middleware
pub mod auth;
