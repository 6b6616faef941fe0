mod common;

use std::sync::Arc;
use std::time::Duration;

use assembly_exec::{ErrorKind, SpecResolver};
use assembly_store::{FileSpecStore, SpecStore};
use common::{CountingFetcher, MemoryStore, SERVICE_ID};

#[tokio::test]
async fn second_resolve_is_served_from_memory() {
    let fetcher = Arc::new(CountingFetcher::new());
    let store = Arc::new(MemoryStore::default());
    let resolver = SpecResolver::new(fetcher.clone(), store.clone());

    let first = resolver.resolve(SERVICE_ID).await.unwrap();
    let second = resolver.resolve(SERVICE_ID).await.unwrap();

    assert_eq!(fetcher.fetches(), 1);
    assert!(Arc::ptr_eq(&first, &second));
    assert!(store.contains(SERVICE_ID));
}

#[tokio::test]
async fn fresh_instance_reads_the_disk_cache() {
    let dir = tempfile::tempdir().unwrap();

    let fetcher = Arc::new(CountingFetcher::new());
    let resolver = SpecResolver::new(fetcher.clone(), Arc::new(FileSpecStore::new(dir.path())));
    let written = resolver.resolve(SERVICE_ID).await.unwrap();
    assert_eq!(fetcher.fetches(), 1);

    let fetcher2 = Arc::new(CountingFetcher::new());
    let resolver2 = SpecResolver::new(fetcher2.clone(), Arc::new(FileSpecStore::new(dir.path())));
    let read = resolver2.resolve(SERVICE_ID).await.unwrap();
    assert_eq!(fetcher2.fetches(), 0);
    assert_eq!(*read, *written);
}

#[tokio::test]
async fn corrupt_disk_entry_triggers_refetch() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSpecStore::new(dir.path());
    std::fs::write(store.entry_path(SERVICE_ID), b"not json").unwrap();

    let fetcher = Arc::new(CountingFetcher::new());
    let resolver = SpecResolver::new(fetcher.clone(), Arc::new(store.clone()));
    resolver.resolve(SERVICE_ID).await.unwrap();

    assert_eq!(fetcher.fetches(), 1);
    assert!(store.get(SERVICE_ID).await.is_some());
}

#[tokio::test]
async fn failed_parse_does_not_write_cache() {
    let mut fetcher = CountingFetcher::new();
    fetcher.fail = true;
    let fetcher = Arc::new(fetcher);
    let store = Arc::new(MemoryStore::default());
    let resolver = SpecResolver::new(fetcher.clone(), store.clone());

    let err = resolver.resolve(SERVICE_ID).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(!store.contains(SERVICE_ID));
    assert!(resolver.cached(SERVICE_ID).await.is_none());

    // Failures are not remembered; the next call tries again.
    resolver.resolve(SERVICE_ID).await.unwrap_err();
    assert_eq!(fetcher.fetches(), 2);
}

#[tokio::test]
async fn concurrent_first_resolution_fetches_once() {
    let mut fetcher = CountingFetcher::new();
    fetcher.delay = Duration::from_millis(50);
    let fetcher = Arc::new(fetcher);
    let resolver = Arc::new(SpecResolver::new(
        fetcher.clone(),
        Arc::new(MemoryStore::default()),
    ));

    let (a, b, c) = tokio::join!(
        resolver.resolve(SERVICE_ID),
        resolver.resolve(SERVICE_ID),
        resolver.resolve(SERVICE_ID),
    );
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(fetcher.fetches(), 1);
}

#[tokio::test]
async fn distinct_ids_resolve_independently() {
    let fetcher = Arc::new(CountingFetcher::new());
    let resolver = SpecResolver::new(fetcher.clone(), Arc::new(MemoryStore::default()));

    let (a, b) = tokio::join!(
        resolver.resolve("OAAAAAAAAAAAAAA1"),
        resolver.resolve("OBBBBBBBBBBBBBB2")
    );
    assert_eq!(a.unwrap().service_id, "OAAAAAAAAAAAAAA1");
    assert_eq!(b.unwrap().service_id, "OBBBBBBBBBBBBBB2");
    assert_eq!(fetcher.fetches(), 2);
}

#[tokio::test]
async fn invalidate_forces_refetch() {
    let fetcher = Arc::new(CountingFetcher::new());
    let store = Arc::new(MemoryStore::default());
    let resolver = SpecResolver::new(fetcher.clone(), store.clone());

    resolver.resolve(SERVICE_ID).await.unwrap();
    resolver.invalidate(SERVICE_ID).await.unwrap();
    assert!(!store.contains(SERVICE_ID));

    resolver.resolve(SERVICE_ID).await.unwrap();
    assert_eq!(fetcher.fetches(), 2);
}

#[tokio::test]
async fn failed_fetch_releases_in_flight_entry() {
    let mut fetcher = CountingFetcher::new();
    fetcher.fail = true;
    let resolver = SpecResolver::new(Arc::new(fetcher), Arc::new(MemoryStore::default()));

    resolver.resolve(SERVICE_ID).await.unwrap_err();
    assert_eq!(resolver.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_fetch_releases_in_flight_entry() {
    let mut fetcher = CountingFetcher::new();
    fetcher.delay = Duration::from_secs(10);
    let fetcher = Arc::new(fetcher);
    let resolver = SpecResolver::new(fetcher.clone(), Arc::new(MemoryStore::default()));

    let cut = tokio::time::timeout(Duration::from_secs(1), resolver.resolve(SERVICE_ID)).await;
    assert!(cut.is_err());
    assert_eq!(resolver.in_flight(), 0);

    resolver.resolve(SERVICE_ID).await.unwrap();
    assert_eq!(resolver.in_flight(), 0);
    assert_eq!(fetcher.fetches(), 2);
}
