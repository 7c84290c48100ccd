use wheel_shared::constants::default_segments;
use wheel_shared::shared_wheel_game::Segment;
use wheel_shared::storage::{parse_stored_segments, serialize_segments, LoadedSegments, SegmentSource, STORAGE_KEY};

use crate::error::Error;
use crate::store::KeyValueStore;

/// Loads the persisted wheel. Never fails: an unreachable store, missing
/// key, corrupt payload, or too-short list all resolve to the defaults.
pub async fn load_segments(store: &KeyValueStore) -> LoadedSegments {
    let raw = match store.get(STORAGE_KEY).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Could not read stored segments, using defaults: {}", e);
            None
        }
    };

    let loaded = parse_stored_segments(raw.as_deref(), &default_segments());
    if loaded.source == SegmentSource::Fallback {
        tracing::debug!("Serving default segments");
    }
    loaded
}

pub async fn save_segments(store: &KeyValueStore, segments: &[Segment]) -> Result<(), Error> {
    let payload = serialize_segments(segments)?;
    store.set(STORAGE_KEY, &payload).await?;
    tracing::info!("💾 Saved wheel with {} segments", segments.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_store_loads_defaults() {
        let store = KeyValueStore::memory();
        let loaded = load_segments(&store).await;
        assert!(loaded.is_default());
        assert_eq!(loaded.segments, default_segments());
    }

    #[tokio::test]
    async fn test_saved_segments_load_back() {
        let store = KeyValueStore::memory();
        let segments = vec![
            Segment::new("a", "Tea", "#A7F3D0", 1.0),
            Segment::new("b", "Coffee", "#FBCFE8", 2.0),
        ];
        save_segments(&store, &segments).await.unwrap();

        let loaded = load_segments(&store).await;
        assert!(!loaded.is_default());
        assert_eq!(loaded.segments, segments);
    }

    #[tokio::test]
    async fn test_corrupt_payload_loads_defaults() {
        let store = KeyValueStore::memory();
        store.set(STORAGE_KEY, "{not json").await.unwrap();
        assert!(load_segments(&store).await.is_default());

        store.set(STORAGE_KEY, r##"[{"id":"1","label":"Lonely","color":"#FFFFFF","rewardValue":1}]"##).await.unwrap();
        assert!(load_segments(&store).await.is_default());
    }

    #[tokio::test]
    async fn test_unreachable_store_loads_defaults() {
        let store = KeyValueStore::redis("redis://127.0.0.1:1").unwrap();
        assert!(load_segments(&store).await.is_default());
    }
}
