//! Document fetching over HTTP and the local filesystem.

use async_trait::async_trait;
use reqwest::Client;

use crate::application::loader::{DocumentFetcher, DocumentSource};

use super::error::InfraError;

/// Fetcher used by the binary: `reqwest` for URLs, `tokio::fs` for paths.
#[derive(Clone, Debug)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new() -> Result<Self, InfraError> {
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client })
    }

    pub fn user_agent() -> &'static str {
        concat!("frontpage/", env!("CARGO_PKG_VERSION"))
    }
}

#[async_trait]
impl DocumentFetcher for SourceFetcher {
    async fn fetch(&self, source: &DocumentSource) -> Result<String, InfraError> {
        match source {
            DocumentSource::Http(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(InfraError::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            DocumentSource::File(path) => Ok(tokio::fs::read_to_string(path).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn reads_file_sources() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"games": {{}}}}"#).expect("write");

        let fetcher = SourceFetcher::new().expect("fetcher");
        let body = fetcher
            .fetch(&DocumentSource::File(file.path().to_path_buf()))
            .await
            .expect("read");
        assert_eq!(body, r#"{"games": {}}"#);
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let fetcher = SourceFetcher::new().expect("fetcher");
        let error = fetcher
            .fetch(&DocumentSource::File(dir.path().join("absent.json")))
            .await
            .expect_err("missing file");
        assert!(matches!(error, InfraError::Io(_)));
    }
}
