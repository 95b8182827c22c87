//! In-memory asset sources for feed and UI tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::data::Asset;
use crate::request::{AssetSource, PageFetchError};
use crate::third_party::coincap::data::ApiAssetsResponse;

pub fn page(start: usize, n: usize) -> Vec<Asset> {
    (start..start + n)
        .map(|i| Asset::new((i + 1).to_string(), format!("C{i}"), format!("Coin {i}")))
        .collect()
}

pub fn decode_error() -> PageFetchError {
    serde_json::from_str::<ApiAssetsResponse>("not json")
        .unwrap_err()
        .into()
}

/// Replays canned responses and records every request. Once the script
/// runs out it answers with empty pages, or with errors when `failing`.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<Asset>, PageFetchError>>>,
    calls: Mutex<Vec<(usize, usize)>>,
    latency: Duration,
    failing: bool,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<Asset>, PageFetchError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            failing: false,
        })
    }

    /// Every request fails after `latency`.
    pub fn failing(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            latency,
            failing: true,
        })
    }

    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl AssetSource for ScriptedSource {
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Asset>, PageFetchError> {
        self.calls.lock().push((limit, offset));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let next = self.responses.lock().pop_front();
        match next {
            Some(response) => response,
            None if self.failing => Err(decode_error()),
            None => Ok(Vec::new()),
        }
    }
}

/// Blocks every request until released.
pub struct GatedSource {
    pub started: Notify,
    pub release: Notify,
    pub calls: AtomicUsize,
}

impl GatedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl AssetSource for GatedSource {
    async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<Asset>, PageFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(page(offset, limit))
    }
}
