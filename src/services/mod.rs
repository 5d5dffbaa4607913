//! Business logic services.
//!
//! Services contain the generation flow separated from HTTP handlers, plus the
//! clients for the generative text service and the document store.

pub mod generator;
pub mod prompt;
pub mod sanitize;
pub mod site_service;
pub mod site_store;
