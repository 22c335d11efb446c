//! Tests for the artifact store.

use std::time::{Duration, Instant};

use uuid::Uuid;

use super::{ArtifactError, ArtifactStore};

fn store() -> ArtifactStore {
    ArtifactStore::new(Duration::from_secs(60), 4)
}

#[test]
fn stores_and_retrieves_bytes() {
    let store = store();
    let handle = Uuid::new_v4();
    store.insert(handle, vec![1, 2, 3]).unwrap();
    assert_eq!(store.get(handle), Some(vec![1, 2, 3]));
}

#[test]
fn unknown_handle_is_none() {
    assert_eq!(store().get(Uuid::new_v4()), None);
}

#[test]
fn handles_are_insert_once() {
    let store = store();
    let handle = Uuid::new_v4();
    store.insert(handle, vec![1]).unwrap();
    let err = store.insert(handle, vec![2]).unwrap_err();
    assert_eq!(err, ArtifactError::DuplicateHandle(handle));
    // The original image is untouched.
    assert_eq!(store.get(handle), Some(vec![1]));
}

#[test]
fn rejects_inserts_at_capacity() {
    let store = ArtifactStore::new(Duration::from_secs(60), 2);
    store.insert(Uuid::new_v4(), vec![0]).unwrap();
    store.insert(Uuid::new_v4(), vec![0]).unwrap();
    let err = store.insert(Uuid::new_v4(), vec![0]).unwrap_err();
    assert_eq!(err, ArtifactError::Saturated { capacity: 2 });
}

#[test]
fn expired_artifacts_are_pruned() {
    let store = ArtifactStore::new(Duration::from_secs(60), 4);
    let handle = Uuid::new_v4();
    let start = Instant::now();
    store.insert_at(handle, vec![9], start).unwrap();

    let before_expiry = start + Duration::from_secs(59);
    assert_eq!(store.get_at(handle, before_expiry), Some(vec![9]));

    let after_expiry = start + Duration::from_secs(61);
    assert_eq!(store.get_at(handle, after_expiry), None);
}

#[test]
fn expiry_frees_capacity_for_new_inserts() {
    let store = ArtifactStore::new(Duration::from_secs(60), 1);
    let start = Instant::now();
    store.insert_at(Uuid::new_v4(), vec![0], start).unwrap();

    let later = start + Duration::from_secs(120);
    store.insert_at(Uuid::new_v4(), vec![1], later).unwrap();
}

#[test]
fn len_counts_live_artifacts() {
    let store = store();
    assert!(store.is_empty());
    store.insert(Uuid::new_v4(), vec![0]).unwrap();
    store.insert(Uuid::new_v4(), vec![0]).unwrap();
    assert_eq!(store.len(), 2);
}
