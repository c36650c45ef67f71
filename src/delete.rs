use tracing::{debug, warn};

use crate::registry::client::{ManifestFetch, Pacer, RegistryClient};
use crate::registry::manifest::Manifest;

/// Per-tag outcome totals of one deletion pass. Observability only; soft
/// failures recorded here never affect the run's exit status.
#[derive(Debug, Default)]
pub struct DeletionReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Deletes every tag in the kill list, one at a time.
///
/// The registry's delete API is digest-addressed, so each tag is first
/// re-resolved by fetching its manifest: a single-platform manifest is
/// deleted through the `Docker-Content-Digest` header, a manifest index
/// through one DELETE per index entry across all platforms. Any per-tag
/// failure (resolution or DELETE) is logged and recorded; it never stops
/// the batch.
pub async fn delete_tags(
    client: &RegistryClient,
    pacer: &mut Pacer,
    kill_list: &[String],
) -> DeletionReport {
    let mut report = DeletionReport::default();

    for tag in kill_list {
        pacer.wait().await;

        let (manifest, content_digest) = match client.manifest_for(tag).await {
            Ok(ManifestFetch::Resolved {
                manifest,
                content_digest,
            }) => (manifest, content_digest),
            Ok(ManifestFetch::Failed(status)) => {
                warn!(
                    tag = %tag,
                    status = %status,
                    "failed to resolve manifest for deletion"
                );
                report.failed.push(tag.clone());
                continue;
            }
            Err(error) => {
                warn!(tag = %tag, error = %error, "failed to resolve manifest for deletion");
                report.failed.push(tag.clone());
                continue;
            }
        };

        let digests: Vec<String> = match (manifest, content_digest) {
            (Manifest::Index(index), _) => {
                index.manifests.into_iter().map(|entry| entry.digest).collect()
            }
            (_, Some(digest)) => vec![digest],
            (_, None) => Vec::new(),
        };
        if digests.is_empty() {
            warn!(tag = %tag, "no digest found for tag");
            report.failed.push(tag.clone());
            continue;
        }

        let mut all_deleted = true;
        for digest in &digests {
            match client.delete_manifest(digest).await {
                Ok(status) if status.is_success() => {
                    debug!(tag = %tag, digest = %digest, status = %status, "deleted manifest");
                }
                Ok(status) => {
                    warn!(tag = %tag, digest = %digest, status = %status, "delete rejected");
                    all_deleted = false;
                }
                Err(error) => {
                    warn!(tag = %tag, digest = %digest, error = %error, "delete failed");
                    all_deleted = false;
                }
            }
        }

        if all_deleted {
            report.deleted.push(tag.clone());
        } else {
            report.failed.push(tag.clone());
        }
    }

    report
}
