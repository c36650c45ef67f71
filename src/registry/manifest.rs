use serde::Deserialize;

/// Response of `GET /v2/{image}/tags/list`.
#[derive(Debug, Deserialize)]
pub struct TagList {
    pub name: String,
    pub tags: Vec<String>,
}

/// A manifest in either of the two wire shapes the registry can return for
/// `GET /v2/{image}/manifests/{reference}`. An index enumerates per-platform
/// manifests for a multi-arch image; an image manifest describes a single
/// platform directly.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Manifest {
    Index(ManifestIndex),
    Image(ImageManifest),
}

#[derive(Debug, Deserialize)]
pub struct ImageManifest {
    pub config: Descriptor,
}

#[derive(Debug, Deserialize)]
pub struct Descriptor {
    pub digest: String,
}

#[derive(Debug, Deserialize)]
pub struct ManifestIndex {
    pub manifests: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
pub struct IndexEntry {
    pub digest: String,
    pub platform: Option<Platform>,
}

#[derive(Debug, Deserialize)]
pub struct Platform {
    pub architecture: String,
    pub os: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_manifest_shape_is_detected() {
        let body = r#"{
            "schemaVersion": 2,
            "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
            "config": {
                "mediaType": "application/vnd.docker.container.image.v1+json",
                "size": 7023,
                "digest": "sha256:b5b2b2c507a0944348e0303114d8d93aaaa081732b86451d9bce1f432a537bc7"
            },
            "layers": []
        }"#;

        let manifest: Manifest = serde_json::from_str(body).unwrap();
        match manifest {
            Manifest::Image(image) => assert!(image.config.digest.starts_with("sha256:b5b2")),
            Manifest::Index(_) => panic!("parsed image manifest as index"),
        }
    }

    #[test]
    fn manifest_index_shape_is_detected() {
        let body = r#"{
            "schemaVersion": 2,
            "mediaType": "application/vnd.oci.image.index.v1+json",
            "manifests": [
                {
                    "digest": "sha256:aaa",
                    "size": 424,
                    "platform": { "architecture": "amd64", "os": "linux" }
                },
                {
                    "digest": "sha256:bbb",
                    "size": 424,
                    "platform": { "architecture": "arm64", "os": "linux" }
                }
            ]
        }"#;

        let manifest: Manifest = serde_json::from_str(body).unwrap();
        match manifest {
            Manifest::Index(index) => {
                assert_eq!(index.manifests.len(), 2);
                assert_eq!(
                    index.manifests[0].platform.as_ref().unwrap().architecture,
                    "amd64"
                );
                assert_eq!(index.manifests[1].platform.as_ref().unwrap().os, "linux");
            }
            Manifest::Image(_) => panic!("parsed manifest index as image manifest"),
        }
    }

    #[test]
    fn tag_list_parses() {
        let body = r#"{ "name": "team/app", "tags": ["v1", "v1-latest", "v2"] }"#;
        let list: TagList = serde_json::from_str(body).unwrap();
        assert_eq!(list.name, "team/app");
        assert_eq!(list.tags, vec!["v1", "v1-latest", "v2"]);
    }
}
