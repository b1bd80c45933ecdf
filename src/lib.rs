//! Homepage renderer for a small content portal.
//!
//! The crate loads the portal's content and link-index documents, renders
//! the news, featured games and latest submissions sections into a host
//! page, and provides the in-memory search behind the results dropdown.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
