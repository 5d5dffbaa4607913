//! Data models for requests, responses, and stored records.

/// Business description submitted by the builder form
pub mod business;
/// Generated site records
pub mod site;
