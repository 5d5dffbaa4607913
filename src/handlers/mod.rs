//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to the site service
//! 3. Returns HTTP response (JSON, status code)

/// Service health check
pub mod health;
/// Site generation and dashboard endpoints
pub mod sites;
