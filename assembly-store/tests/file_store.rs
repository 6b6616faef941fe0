use assembly_core::{ApiParameter, ApiSpec};
use assembly_store::{FileSpecStore, SpecStore};

fn spec(service_id: &str) -> ApiSpec {
    ApiSpec::new(
        service_id,
        "https://open.assembly.go.kr/portal/openapi/nwvrqwxyaytdsfvhu",
        vec![ApiParameter::new("KEY", "STRING(필수)", "인증키")],
        vec![ApiParameter::new("HG_NM", "STRING(선택)", "이름")],
    )
}

#[tokio::test]
async fn missing_entry_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSpecStore::new(dir.path());
    assert!(store.get("OWSSC6001134T516707").await.is_none());
}

#[tokio::test]
async fn put_then_get_returns_same_spec() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSpecStore::new(dir.path().join("nested").join("cache"));
    let s = spec("OWSSC6001134T516707");
    store.put(&s).await.unwrap();

    assert!(store.entry_path("OWSSC6001134T516707").exists());
    assert_eq!(store.get("OWSSC6001134T516707").await, Some(s));
}

#[tokio::test]
async fn put_overwrites_existing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSpecStore::new(dir.path());
    store.put(&spec("svc00000000001")).await.unwrap();

    let mut updated = spec("svc00000000001");
    updated.request_params.clear();
    store.put(&updated).await.unwrap();

    assert_eq!(store.get("svc00000000001").await, Some(updated));
}

#[tokio::test]
async fn corrupt_entry_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSpecStore::new(dir.path());
    std::fs::write(store.entry_path("broken00000001"), b"{ not json").unwrap();
    assert!(store.get("broken00000001").await.is_none());

    std::fs::write(store.entry_path("partial0000001"), br#"{"service_id":"x"}"#).unwrap();
    assert!(store.get("partial0000001").await.is_none());
}

#[tokio::test]
async fn invalidate_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSpecStore::new(dir.path());
    store.put(&spec("svc00000000001")).await.unwrap();

    store.invalidate("svc00000000001").await.unwrap();
    assert!(store.get("svc00000000001").await.is_none());
    store.invalidate("svc00000000001").await.unwrap();
    store.invalidate("never-written").await.unwrap();
}
