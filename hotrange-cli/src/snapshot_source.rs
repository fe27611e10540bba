use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Admin UI endpoint serving the range status document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HttpSnapshot {
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) path: String,
    pub(crate) timeout_ms: u64,
}

impl HttpSnapshot {
    pub(crate) fn url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()?;

        let url = self.url();
        info!(url = %url, "fetching range status snapshot");
        let resp = http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?
            .error_for_status()?;
        let body = resp.bytes().await?;
        Ok(body.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SnapshotSource {
    Http(HttpSnapshot),
    File(PathBuf),
}

impl SnapshotSource {
    /// Raw snapshot bytes, undecoded.
    pub(crate) async fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            SnapshotSource::Http(http) => http.fetch().await,
            SnapshotSource::File(path) => {
                info!(path = %path.display(), "reading range status snapshot");
                tokio::fs::read(path)
                    .await
                    .with_context(|| format!("Failed to read snapshot file {:?}", path))
            }
        }
    }
}
