//! Concurrent load of the content and link-index documents.

use std::{fmt, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::{
    domain::{content::ContentStore, links::LinkIndex},
    infra::error::InfraError,
};

use super::state::AppState;

pub const DEFAULT_CONTENT_PATH: &str = "data/content.json";
pub const DEFAULT_LINKS_PATH: &str = "data/contentlinks.json";

/// Location of one JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Http(Url),
    File(PathBuf),
}

impl DocumentSource {
    /// Interpret `location` as an `http(s)` URL when it parses as one, else as a path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            _ => Self::File(PathBuf::from(location)),
        }
    }

    /// Resolve `relative` against a base directory or base URL. Absolute
    /// URLs in `relative` win over the base.
    pub fn resolve(base: &str, relative: &str) -> Result<Self, InfraError> {
        if let Self::Http(url) = Self::parse(relative) {
            return Ok(Self::Http(url));
        }

        match Self::parse(base) {
            Self::Http(mut base_url) => {
                if !base_url.path().ends_with('/') {
                    let path = format!("{}/", base_url.path());
                    base_url.set_path(&path);
                }
                let joined = base_url.join(relative).map_err(|err| {
                    InfraError::configuration(format!(
                        "cannot join `{relative}` onto `{base_url}`: {err}"
                    ))
                })?;
                Ok(Self::Http(joined))
            }
            Self::File(dir) => Ok(Self::File(dir.join(relative))),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Http(url) => write!(f, "{url}"),
            DocumentSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, source: &DocumentSource) -> Result<String, InfraError>;
}

/// The two documents a homepage load needs.
#[derive(Debug, Clone)]
pub struct DocumentSources {
    pub content: DocumentSource,
    pub links: DocumentSource,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {resource} from `{location}`")]
    Fetch {
        resource: &'static str,
        location: String,
        #[source]
        source: InfraError,
    },
    #[error("failed to parse {resource}")]
    Parse {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

const CONTENT_RESOURCE: &str = "content document";
const LINKS_RESOURCE: &str = "link index";

#[derive(Clone)]
pub struct ContentLoader {
    fetcher: Arc<dyn DocumentFetcher>,
    sources: DocumentSources,
}

impl ContentLoader {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, sources: DocumentSources) -> Self {
        Self { fetcher, sources }
    }

    pub fn sources(&self) -> &DocumentSources {
        &self.sources
    }

    /// Fetch both documents concurrently and parse them. Either failure
    /// fails the whole load.
    pub async fn load(&self) -> Result<AppState, LoadError> {
        let (content_raw, links_raw) = tokio::try_join!(
            self.fetch(CONTENT_RESOURCE, &self.sources.content),
            self.fetch(LINKS_RESOURCE, &self.sources.links),
        )?;

        let store = ContentStore::from_json(&content_raw).map_err(|source| LoadError::Parse {
            resource: CONTENT_RESOURCE,
            source,
        })?;
        let links = LinkIndex::from_json(&links_raw).map_err(|source| LoadError::Parse {
            resource: LINKS_RESOURCE,
            source,
        })?;

        info!(
            target = "frontpage::loader",
            content = %self.sources.content,
            links = %self.sources.links,
            linked_games = links.games.len(),
            "Content data and links loaded"
        );

        Ok(AppState::new(store, links))
    }

    async fn fetch(
        &self,
        resource: &'static str,
        source: &DocumentSource,
    ) -> Result<String, LoadError> {
        self.fetcher
            .fetch(source)
            .await
            .map_err(|source_error| LoadError::Fetch {
                resource,
                location: source.to_string(),
                source: source_error,
            })
    }
}
