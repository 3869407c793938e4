//! Shared fixtures for container and manifest tests

use crate::addon_startup::jar_root_uri;
use crate::mozlz4::{self, MozLz4File};
use rand::{RngExt, SeedableRng};
use serde_json::{Map, Value, json};
use std::io::Cursor;

/// Deterministic high-entropy payload of `len` bytes
pub fn random_payload(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);
    data
}

/// Compact `app-profile` manifest with `count` add-ons installed under `base`
pub fn profile_manifest(base: &str, count: usize) -> Vec<u8> {
    let addons: Map<String, Value> = (0..count)
        .map(|i| {
            let id = format!("addon-{i}@example.org");
            let record = json!({
                "enabled": true,
                "lastModifiedTime": 1_700_000_000_000_u64 + i as u64,
                "rootURI": jar_root_uri(base, &id).expect("absolute base path"),
                "version": format!("1.{i}")
            });
            (id, record)
        })
        .collect();

    let manifest = json!({
        "app-profile": {
            "path": base,
            "shouldCheckStartupModifications": false,
            "addons": addons
        }
    });
    serde_json::to_vec(&manifest).expect("manifest serializes")
}

/// Encode `payload`, then check header, rebuild and decode against it
pub fn assert_container_round_trip(payload: &[u8]) {
    let encoded = mozlz4::encode(payload).expect("encode should succeed");
    let container =
        MozLz4File::read_from(&mut Cursor::new(&encoded)).expect("container should parse");

    assert_eq!(container.header.decompressed_len(), payload.len());
    assert_eq!(container.to_bytes().expect("rebuild should succeed"), encoded);
    assert_eq!(
        container.decompress().expect("decompress should succeed"),
        payload
    );
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_random_payload_is_deterministic() {
        assert_eq!(random_payload(64, 1), random_payload(64, 1));
        assert_ne!(random_payload(64, 1), random_payload(64, 2));
    }

    #[test]
    fn test_profile_manifest_shape() {
        let payload = profile_manifest("/portable/data/profile/default/extensions", 3);
        let value: Value = serde_json::from_slice(&payload).unwrap();

        let addons = value["app-profile"]["addons"].as_object().unwrap();
        assert_eq!(addons.len(), 3);
        assert_eq!(
            addons["addon-2@example.org"]["rootURI"],
            "jar:file:///portable/data/profile/default/extensions/addon-2@example.org.xpi!/"
        );
    }
}
