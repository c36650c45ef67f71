use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};

use crate::config::{PruneOptions, DEFAULT_TIMEOUT_SECS, MANIFEST_ACCEPT_HEADER, WAIT_PERIOD_MS};
use crate::error::{PruneError, Result};
use crate::registry::manifest::{Manifest, TagList};

/// `Authorization` header value for HTTP Basic credentials.
pub fn basic_auth_header(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, password)))
}

/// Linear backoff between requests of one batch: the n-th wait sleeps
/// `period * n`, so the first request of a batch is never delayed. The
/// counter is owned by the caller, one pacer per batch.
pub struct Pacer {
    period: Duration,
    count: u32,
}

impl Pacer {
    pub fn new() -> Self {
        Self::with_period(Duration::from_millis(WAIT_PERIOD_MS))
    }

    pub fn with_period(period: Duration) -> Self {
        Self { period, count: 0 }
    }

    pub async fn wait(&mut self) {
        if self.count > 0 {
            tokio::time::sleep(self.period * self.count).await;
        }
        self.count += 1;
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a manifest GET. A success status always carries the parsed
/// body; callers decide whether a miss is fatal.
pub enum ManifestFetch {
    Resolved {
        manifest: Manifest,
        /// Value of the `Docker-Content-Digest` response header, when present.
        content_digest: Option<String>,
    },
    Failed(StatusCode),
}

/// Authenticated client for one image on one registry.
pub struct RegistryClient {
    client: Client,
    base: String,
    image: String,
    auth_header: String,
}

impl RegistryClient {
    /// Expects already-normalized options (domain carries a scheme).
    pub fn new(options: &PruneOptions) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base: options.domain.clone(),
            image: options.image.clone(),
            auth_header: basic_auth_header(&options.user, &options.password),
        })
    }

    /// Fetches the complete tag list for the image. A non-success status is
    /// fatal: nothing useful can be reconciled without the tag list.
    pub async fn tag_list(&self) -> Result<Vec<String>> {
        let url = format!("{}/v2/{}/tags/list", self.base, self.image);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PruneError::RegistryUnavailable(response.status()));
        }

        let list: TagList = response.json().await?;
        Ok(list.tags)
    }

    /// Fetches the manifest for a tag or digest. Transport errors surface as
    /// `Err`; an unhappy status comes back in the response so callers can
    /// treat it as a soft failure.
    pub async fn manifest_for(&self, reference: &str) -> Result<ManifestFetch> {
        let url = format!("{}/v2/{}/manifests/{}", self.base, self.image, reference);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, MANIFEST_ACCEPT_HEADER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(ManifestFetch::Failed(status));
        }

        let content_digest = response
            .headers()
            .get("docker-content-digest")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let manifest = response.json::<Manifest>().await?;

        Ok(ManifestFetch::Resolved {
            manifest,
            content_digest,
        })
    }

    /// Deletes the digest-addressed manifest. The status is returned rather
    /// than checked: deletion failures are the caller's soft-failure policy.
    pub async fn delete_manifest(&self, digest: &str) -> Result<StatusCode> {
        let url = format!("{}/v2/{}/manifests/{}", self.base, self.image, digest);
        let response = self
            .client
            .delete(&url)
            .header(AUTHORIZATION, &self.auth_header)
            .send()
            .await?;

        Ok(response.status())
    }
}
