#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assembly_core::{ApiParameter, ApiSpec};
use assembly_exec::{
    AssemblyError, HttpClient, HttpError, HttpRequestParts, HttpResponseParts, SpecFetcher,
};
use assembly_store::{SpecStore, StoreError};
use async_trait::async_trait;

pub const SERVICE_ID: &str = "OWSSC6001134T516707";
pub const ENDPOINT: &str = "nwvrqwxyaytdsfvhu";

pub fn sample_spec(service_id: &str) -> ApiSpec {
    ApiSpec::new(
        service_id,
        format!("https://open.assembly.go.kr/portal/openapi/{ENDPOINT}"),
        vec![ApiParameter::new("KEY", "STRING(필수)", "인증키")],
        vec![ApiParameter::new("HG_NM", "STRING(선택)", "이름")],
    )
}

pub fn response(status: u16, body: impl Into<Vec<u8>>) -> Result<HttpResponseParts, HttpError> {
    Ok(HttpResponseParts {
        status,
        headers: BTreeMap::new(),
        body: body.into(),
    })
}

pub fn envelope_body(code: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        ENDPOINT: [
            { "head": [
                { "list_total_count": 1 },
                { "RESULT": { "CODE": code, "MESSAGE": format!("message for {code}") } }
            ] },
            { "row": [ { "HG_NM": "홍길동", "POLY_NM": "무소속" } ] }
        ]
    }))
    .unwrap()
}

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct ScriptedHttp {
    script: Mutex<VecDeque<Result<HttpResponseParts, HttpError>>>,
    pub requests: Mutex<Vec<HttpRequestParts>>,
}

impl ScriptedHttp {
    pub fn new(script: Vec<Result<HttpResponseParts, HttpError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequestParts {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn send(
        &self,
        req: HttpRequestParts,
        _timeout: Duration,
        _max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Other("script exhausted".to_string())))
    }
}

/// Returns a fixed spec and counts how often it was asked.
pub struct CountingFetcher {
    pub count: Arc<AtomicUsize>,
    pub delay: Duration,
    pub fail: bool,
}

impl CountingFetcher {
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
            fail: false,
        }
    }

    pub fn fetches(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpecFetcher for CountingFetcher {
    async fn fetch(&self, service_id: &str) -> Result<ApiSpec, AssemblyError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(assembly_core::ParseError::EndpointNotFound {
                service_id: service_id.to_string(),
            }
            .into());
        }
        Ok(sample_spec(service_id))
    }
}

/// In-memory store for tests that must not touch the filesystem.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, ApiSpec>>,
}

impl MemoryStore {
    pub fn contains(&self, service_id: &str) -> bool {
        self.entries.lock().unwrap().contains_key(service_id)
    }
}

#[async_trait]
impl SpecStore for MemoryStore {
    async fn get(&self, service_id: &str) -> Option<ApiSpec> {
        self.entries.lock().unwrap().get(service_id).cloned()
    }

    async fn put(&self, spec: &ApiSpec) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(spec.service_id.clone(), spec.clone());
        Ok(())
    }

    async fn invalidate(&self, service_id: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(service_id);
        Ok(())
    }
}
