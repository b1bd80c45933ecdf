//! Domain model for the homepage documents.

pub mod content;
pub mod links;
