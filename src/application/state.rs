use crate::domain::{content::ContentStore, links::LinkIndex};

/// Loaded homepage documents. Built once by the loader and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: ContentStore,
    pub links: LinkIndex,
}

impl AppState {
    pub fn new(store: ContentStore, links: LinkIndex) -> Self {
        Self { store, links }
    }
}
