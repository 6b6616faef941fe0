use std::collections::BTreeMap;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::executor::response::ResponseFormat;

pub const KEY_PARAM: &str = "KEY";
pub const TYPE_PARAM: &str = "Type";
pub const PAGE_INDEX_PARAM: &str = "pIndex";
pub const PAGE_SIZE_PARAM: &str = "pSize";

/// Default query parameters overlaid with the caller's; caller values win on collision.
pub fn merge_params(
    config: &ClientConfig,
    format: ResponseFormat,
    params: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    merged.insert(TYPE_PARAM.to_string(), format.as_str().to_string());
    merged.insert(PAGE_INDEX_PARAM.to_string(), config.page_index.to_string());
    merged.insert(PAGE_SIZE_PARAM.to_string(), config.page_size.to_string());
    if let Some(key) = &config.api_key {
        merged.insert(KEY_PARAM.to_string(), key.expose().to_string());
    }
    merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// `<base_url>/<endpoint>?<query>`.
pub fn build_url(
    base_url: &str,
    endpoint: &str,
    query: &BTreeMap<String, String>,
) -> Result<url::Url, TransportError> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), endpoint);
    let mut url = url::Url::parse(&raw).map_err(|e| TransportError::Url(e.to_string()))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}
