use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use assembly_core::{ServiceMap, ServiceResolver};
use assembly_exec::{AssemblyClient, AssemblyError, ClientConfig, ErrorKind};
use serde_json::Value;

use crate::exit_codes;
use crate::{ClientArgs, ParamsArgs};

/// Client configuration from the environment, with flags taking precedence.
pub fn build_client_config(args: &ClientArgs) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(key) = &args.api_key {
        config = config.with_api_key(key.clone());
    }
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = dir.clone();
    }
    if let Some(revision) = args.revision {
        config.revision = revision;
    }
    config.request_timeout = Duration::from_secs(args.timeout);
    config.call_timeout = args.call_timeout.map(Duration::from_secs);
    config
}

/// Built-in registry, extended with `--registry` when given.
pub fn load_services(args: &ClientArgs) -> Result<ServiceResolver, String> {
    let mut services = ServiceMap::builtin();
    if let Some(path) = &args.registry {
        let extra = ServiceMap::from_json_file(path).map_err(|e| e.to_string())?;
        services.extend(extra);
    }
    Ok(ServiceResolver::new(services))
}

pub fn build_client(args: &ClientArgs) -> Result<AssemblyClient, String> {
    let services = load_services(args)?;
    let config = build_client_config(args);
    let http = assembly_exec::ReqwestHttpClient::new(&config.user_agent)
        .map_err(|e| format!("failed to build HTTP client: {e}"))?;
    let store = assembly_store::FileSpecStore::new(config.cache_dir.clone());
    Ok(AssemblyClient::with_http(
        config,
        std::sync::Arc::new(http),
        services,
        std::sync::Arc::new(store),
    ))
}

/// Query parameters from `--params-file` overlaid with `--param KEY=VALUE`.
pub fn load_params(args: &ParamsArgs) -> Result<BTreeMap<String, String>, String> {
    let mut params = match &args.params_file {
        Some(path) => read_params_file(path)?,
        None => BTreeMap::new(),
    };
    for s in &args.params {
        let Some((k, v)) = s.split_once('=') else {
            return Err(format!("expected KEY=VALUE, got '{s}'"));
        };
        params.insert(k.trim().to_string(), v.to_string());
    }
    Ok(params)
}

fn read_params_file(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read params: {e}"))?;
    let value: Value = match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(_) => serde_yaml::from_str(&content)
            .map_err(|_| "params file is neither valid JSON nor YAML".to_string())?,
    };
    let Value::Object(map) = value else {
        return Err("params file must contain an object".to_string());
    };
    Ok(map
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect())
}

pub fn exit_code_for(err: &AssemblyError) -> i32 {
    match err.kind() {
        ErrorKind::Resolution => exit_codes::USAGE_ERROR,
        ErrorKind::Api => exit_codes::API_ERROR,
        _ => exit_codes::RUNTIME_ERROR,
    }
}

