use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};

use assembly_core::ApiSpec;
use assembly_store::SpecStore;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::AssemblyError;
use crate::spec::fetch::SpecFetcher;

/// Read-through resolution of service ids to specifications.
///
/// Lookup order: in-memory table, then the persistent store, then the fetcher. A fetched spec is
/// written to the store before it is returned. Entries are never evicted from the table.
/// Concurrent first resolutions of one id share a single fetch.
pub struct SpecResolver {
    fetcher: Arc<dyn SpecFetcher>,
    store: Arc<dyn SpecStore>,
    state: StdMutex<State>,
}

#[derive(Default)]
struct State {
    specs: HashMap<String, Arc<ApiSpec>>,
    inflight: HashMap<String, Arc<Mutex<()>>>,
}

/// Removes the in-flight gate when the resolving call ends, however it ends.
struct FlightGuard<'a> {
    resolver: &'a SpecResolver,
    service_id: &'a str,
    gate: Arc<Mutex<()>>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut s = self.resolver.state();
        let ours = s
            .inflight
            .get(self.service_id)
            .is_some_and(|g| Arc::ptr_eq(g, &self.gate));
        if ours {
            s.inflight.remove(self.service_id);
        }
    }
}

impl SpecResolver {
    pub fn new(fetcher: Arc<dyn SpecFetcher>, store: Arc<dyn SpecStore>) -> Self {
        Self {
            fetcher,
            store,
            state: StdMutex::new(State::default()),
        }
    }

    pub async fn resolve(&self, service_id: &str) -> Result<Arc<ApiSpec>, AssemblyError> {
        let gate = {
            let mut s = self.state();
            if let Some(spec) = s.specs.get(service_id) {
                return Ok(spec.clone());
            }
            s.inflight.entry(service_id.to_string()).or_default().clone()
        };

        let _guard = FlightGuard {
            resolver: self,
            service_id,
            gate: gate.clone(),
        };
        let _flight = gate.lock().await;
        if let Some(spec) = self.cached(service_id).await {
            return Ok(spec);
        }

        let spec = Arc::new(self.load(service_id).await?);
        self.state()
            .specs
            .insert(service_id.to_string(), spec.clone());
        Ok(spec)
    }

    /// Spec already held in memory, without touching the store or the network.
    pub async fn cached(&self, service_id: &str) -> Option<Arc<ApiSpec>> {
        self.state().specs.get(service_id).cloned()
    }

    /// Number of service ids with a resolution currently in progress.
    pub fn in_flight(&self) -> usize {
        self.state().inflight.len()
    }

    /// Forgets `service_id` in memory and on disk so the next call re-downloads.
    pub async fn invalidate(&self, service_id: &str) -> Result<(), AssemblyError> {
        self.state().specs.remove(service_id);
        self.store.invalidate(service_id).await?;
        Ok(())
    }

    async fn load(&self, service_id: &str) -> Result<ApiSpec, AssemblyError> {
        if let Some(spec) = self.store.get(service_id).await {
            return Ok(spec);
        }

        info!(service_id, "resolving spec");
        let spec = self.fetcher.fetch(service_id).await?;
        self.store.put(&spec).await?;
        Ok(spec)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
