use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::TARGET_ARCHITECTURE;
use crate::error::Result;
use crate::registry::client::{ManifestFetch, Pacer, RegistryClient};
use crate::registry::manifest::Manifest;

/// Bidirectional relation between tags and the content digests they
/// reference, built once per run and read-only afterwards.
///
/// Invariant: for every `(tag, reference)` pair, `tag` appears in
/// `tags_for(reference)`. Tags that failed to resolve are absent entirely.
#[derive(Debug, Default)]
pub struct ReferenceMap {
    /// Resolved tags in discovery order.
    tags: Vec<String>,
    tag_to_ref: HashMap<String, String>,
    ref_to_tags: HashMap<String, Vec<String>>,
}

impl ReferenceMap {
    /// Resolved tags in the order the registry listed them.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The canonical reference a tag resolved to.
    pub fn ref_for(&self, tag: &str) -> Option<&str> {
        self.tag_to_ref.get(tag).map(String::as_str)
    }

    /// Every tag bound to a reference, in discovery order.
    pub fn tags_for(&self, reference: &str) -> &[String] {
        self.ref_to_tags
            .get(reference)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All `(tag, canonical reference)` pairs, unordered.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tag_to_ref
            .iter()
            .map(|(tag, reference)| (tag.as_str(), reference.as_str()))
    }

    /// Records a resolved tag. `refs[0]` is the canonical reference; every
    /// listed reference gains the tag in the inverse relation. Insertion
    /// order defines discovery order.
    pub fn insert(&mut self, tag: &str, refs: &[String]) {
        let Some(canonical) = refs.first() else {
            return;
        };

        self.tags.push(tag.to_string());
        self.tag_to_ref.insert(tag.to_string(), canonical.clone());
        for reference in refs {
            self.ref_to_tags
                .entry(reference.clone())
                .or_default()
                .push(tag.to_string());
        }
    }
}

/// Walks every tag of the image and resolves it to its content digests.
///
/// The tag list is fetched exactly once and its failure aborts the run. A
/// single tag failing to resolve is soft: the tag is logged and skipped so
/// one malformed tag cannot abort reconciliation. For a manifest index only
/// entries of the target architecture are tracked, the first of them being
/// the canonical reference.
pub async fn build_reference_map(
    client: &RegistryClient,
    pacer: &mut Pacer,
) -> Result<ReferenceMap> {
    let tags = client.tag_list().await?;
    debug!(count = tags.len(), tags = ?tags, "discovered tags");

    let mut map = ReferenceMap::default();
    for tag in &tags {
        pacer.wait().await;

        let manifest = match client.manifest_for(tag).await {
            Ok(ManifestFetch::Resolved { manifest, .. }) => manifest,
            Ok(ManifestFetch::Failed(status)) => {
                warn!(tag = %tag, status = %status, "manifest fetch failed, skipping tag");
                continue;
            }
            Err(error) => {
                warn!(tag = %tag, error = %error, "manifest fetch failed, skipping tag");
                continue;
            }
        };

        let refs: Vec<String> = match manifest {
            Manifest::Image(image) => vec![image.config.digest],
            Manifest::Index(index) => index
                .manifests
                .iter()
                .filter(|entry| {
                    entry
                        .platform
                        .as_ref()
                        .is_some_and(|p| p.architecture == TARGET_ARCHITECTURE)
                })
                .map(|entry| entry.digest.clone())
                .collect(),
        };

        if refs.is_empty() {
            warn!(
                tag = %tag,
                architecture = TARGET_ARCHITECTURE,
                "no matching platform entry in manifest index, skipping tag"
            );
            continue;
        }

        debug!(tag = %tag, reference = %refs[0], "resolved tag");
        map.insert(tag, &refs);
    }

    Ok(map)
}
