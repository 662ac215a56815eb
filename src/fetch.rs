//! Cache-aware fetch capability.
//!
//! `CachedFetcher` wraps a `Transport` with an in-memory response cache keyed
//! by endpoint + serialized params. Failures are collapsed to `None` so
//! callers can keep whatever state they already have; the error itself is
//! logged here.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchResult;
use crate::log;

/// Transport seam behind the fetch capability.
///
/// Implementations resolve an endpoint key + JSON params to a JSON response.
/// Swappable so the demo feed and test stubs share the same fetch path.
pub trait Transport {
    fn request(
        &self,
        endpoint: &str,
        params: &Value,
    ) -> impl Future<Output = FetchResult<Value>> + Send;
}

/// Fetcher with an internal response cache.
pub struct CachedFetcher<T: Transport> {
    transport: T,
    cache: Mutex<HashMap<String, Value>>,
}

impl<T: Transport> CachedFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a response for `endpoint_key` + `params`, serving repeats from
    /// the cache. Returns `None` on any failure (serialization, transport,
    /// decode); the accumulated caller state stays untouched in that case.
    pub async fn fetch_with_cache<R, P>(&self, endpoint_key: &str, params: &P) -> Option<R>
    where
        R: DeserializeOwned,
        P: Serialize,
    {
        let params = match serde_json::to_value(params) {
            Ok(v) => v,
            Err(e) => {
                log::log(&format!("Failed to serialize params for {}: {}", endpoint_key, e));
                return None;
            }
        };
        let key = cache_key(endpoint_key, &params);

        if let Some(hit) = self.cache.lock().unwrap().get(&key).cloned() {
            log::log(&format!("cache hit: {}", key));
            return decode(endpoint_key, hit);
        }

        log::log_request(endpoint_key, &params.to_string());
        match self.transport.request(endpoint_key, &params).await {
            Ok(value) => {
                log::log_response(endpoint_key, &value.to_string());
                self.cache.lock().unwrap().insert(key, value.clone());
                decode(endpoint_key, value)
            }
            Err(e) => {
                log::log(&format!("Fetch failed for {}: {}", endpoint_key, e));
                None
            }
        }
    }

    /// Drop all cached responses for the given endpoint.
    pub fn invalidate(&self, endpoint_key: &str) {
        let prefix = format!("{}@", endpoint_key);
        self.cache
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(&prefix));
    }

    /// Number of cached responses.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }
}

fn cache_key(endpoint_key: &str, params: &Value) -> String {
    format!("{}@{}", endpoint_key, params)
}

fn decode<R: DeserializeOwned>(endpoint_key: &str, value: Value) -> Option<R> {
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::log(&format!("Failed to decode response for {}: {}", endpoint_key, e));
            None
        }
    }
}
