//! Request and response types for the HTTP layer.

pub mod command;
pub mod summary;
