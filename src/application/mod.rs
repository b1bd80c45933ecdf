//! Application services: loading, rendering, search and page composition.

pub mod error;
pub mod homepage;
pub mod loader;
pub mod page;
pub mod panel;
pub mod search;
pub mod sections;
pub mod state;
