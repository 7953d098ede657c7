//! HTTP library fetcher with ETag change detection.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::ETAG;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::error::LibraryError;
use super::traits::LibrarySource;
use super::types::FetchOutcome;

/// Fetches the library XML over HTTP.
///
/// The ETag response header is the change fingerprint: when it matches the
/// previous run's value the body is not downloaded at all. Otherwise the
/// body is streamed chunk by chunk to the destination file, never held in
/// memory whole (the library can be hundreds of megabytes).
pub struct HttpLibrarySource {
    client: Client,
    url: String,
}

impl HttpLibrarySource {
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, LibraryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl LibrarySource for HttpLibrarySource {
    async fn fetch(
        &self,
        dest: &Path,
        previous_etag: Option<&str>,
    ) -> Result<FetchOutcome, LibraryError> {
        debug!(url = %self.url, "checking if XML library has changed");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LibraryError::Upstream {
                status: status.as_u16(),
            });
        }

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(LibraryError::MissingEtag)?;
        debug!(etag = %etag, "library digest");

        if previous_etag == Some(etag.as_str()) {
            return Ok(FetchOutcome {
                changed: false,
                etag,
            });
        }

        debug!(path = %dest.display(), "downloading XML library");
        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(FetchOutcome {
            changed: true,
            etag,
        })
    }
}
