use regex::Regex;

use crate::error::{PruneError, Result};

/// Manifest Accept header for the registry API.
/// Manifest list and OCI index types must come FIRST so multi-arch images
/// are returned in their index form rather than a platform-resolved manifest.
pub const MANIFEST_ACCEPT_HEADER: &str =
    "application/vnd.docker.distribution.manifest.list.v2+json, \
     application/vnd.oci.image.index.v1+json, \
     application/vnd.docker.distribution.manifest.v2+json, \
     application/vnd.oci.image.manifest.v1+json";

/// Architecture whose index entry becomes a tag's canonical reference.
pub const TARGET_ARCHITECTURE: &str = "amd64";

/// Base inter-request delay; grows linearly with the request count.
pub const WAIT_PERIOD_MS: u64 = 50;

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Inputs for one prune run. Constructed once, normalized before any
/// network activity, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PruneOptions {
    /// Registry domain, scheme optional (https assumed when absent).
    pub domain: String,
    /// Username for HTTP Basic auth.
    pub user: String,
    /// Password for HTTP Basic auth.
    pub password: String,
    /// The image whose tags get reconciled.
    pub image: String,
    /// Tags matching this pattern (and every tag sharing their content)
    /// are kept.
    pub pattern: Regex,
}

impl PruneOptions {
    pub fn new(
        domain: &str,
        user: &str,
        password: &str,
        image: &str,
        pattern: &str,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| PruneError::Config(format!("invalid keep pattern: {}", e)))?;

        Ok(Self {
            domain: domain.to_string(),
            user: user.to_string(),
            password: password.to_string(),
            image: image.to_string(),
            pattern,
        })
    }

    /// Returns the options with the domain turned into a usable base URL.
    pub fn normalized(mut self) -> Self {
        self.domain = domain_to_base(&self.domain);
        self
    }
}

/// Prefixes the domain with `https://` unless a scheme is already present.
fn domain_to_base(domain: &str) -> String {
    if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    }
}
