use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::{DEFAULT_EXPECTED_TOTAL, ITEMS_PER_PAGE, MIN_LOADING_DISPLAY_MS};
use crate::data::Asset;
use crate::feed::FeedState;
use crate::request::AssetSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedSettings {
    pub page_size: usize,
    pub expected_total: usize,
    /// Minimum time a successful load stays in the loading state.
    pub min_loading: Duration,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: ITEMS_PER_PAGE,
            expected_total: DEFAULT_EXPECTED_TOTAL,
            min_loading: Duration::from_millis(MIN_LOADING_DISPLAY_MS),
        }
    }
}

/// What happened to one `load_next_page` call. Informational only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page appended and cursor advanced.
    Applied { appended: usize },
    /// Fetch failed; state left untouched apart from the loading flag.
    Failed,
    /// Another load was in flight, no request was issued.
    AlreadyLoading,
    /// `has_more` is false, no request was issued.
    Exhausted,
    /// Feed was torn down before or during the load.
    Cancelled,
    /// Response arrived but the load was no longer current.
    Discarded,
}

struct Inner {
    state: FeedState,
    generation: u64,
    in_flight: Option<u64>,
    torn_down: bool,
}

pub struct PaginatedAssetFeed {
    source: Arc<dyn AssetSource>,
    inner: Mutex<Inner>,
    min_loading: Duration,
    shutdown: watch::Sender<bool>,
}

impl PaginatedAssetFeed {
    pub fn new(source: Arc<dyn AssetSource>, settings: FeedSettings) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            source,
            inner: Mutex::new(Inner {
                state: FeedState::new(settings.page_size, settings.expected_total),
                generation: 0,
                in_flight: None,
                torn_down: false,
            }),
            min_loading: settings.min_loading,
            shutdown,
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.inner.lock().state.clone()
    }

    #[cfg(test)]
    pub fn with_state<R>(&self, f: impl FnOnce(&FeedState) -> R) -> R {
        f(&self.inner.lock().state)
    }

    #[cfg(test)]
    pub fn has_more(&self) -> bool {
        self.inner.lock().state.has_more
    }

    #[cfg(test)]
    pub fn is_torn_down(&self) -> bool {
        self.inner.lock().torn_down
    }

    /// Fetches the page after the cursor and appends it.
    ///
    /// Only one load runs at a time: a call made while another is in flight
    /// returns [`LoadOutcome::AlreadyLoading`] without touching the source.
    /// Fetch errors are logged and absorbed.
    pub async fn load_next_page(&self) -> LoadOutcome {
        let (token, new_offset, page_size) = {
            let mut inner = self.inner.lock();
            if inner.torn_down {
                return LoadOutcome::Cancelled;
            }
            if !inner.state.has_more {
                return LoadOutcome::Exhausted;
            }
            if inner.in_flight.is_some() {
                log::debug!(
                    "feed.load_skipped in_flight offset={}",
                    inner.state.next_offset()
                );
                return LoadOutcome::AlreadyLoading;
            }
            inner.generation += 1;
            let token = inner.generation;
            inner.in_flight = Some(token);
            inner.state.is_loading = true;
            (token, inner.state.next_offset(), inner.state.page_size)
        };

        let request_offset = usize::try_from(new_offset).unwrap_or(0);
        log::info!(
            "feed.load_start generation={} limit={} offset={}",
            token,
            page_size,
            request_offset
        );

        let mut shutdown = self.shutdown.subscribe();

        let fetched = tokio::select! {
            result = self.source.fetch_page(page_size, request_offset) => result,
            _ = shutdown.wait_for(|down| *down) => {
                return self.settle(token, new_offset, None, true);
            }
        };

        let page = match fetched {
            Ok(assets) => Some(assets),
            Err(e) => {
                log::warn!("feed.fetch_failed offset={} error={}", request_offset, e);
                None
            }
        };

        if page.is_some() && !self.min_loading.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(self.min_loading) => {}
                _ = shutdown.wait_for(|down| *down) => {
                    return self.settle(token, new_offset, None, true);
                }
            }
        }

        self.settle(token, new_offset, page, false)
    }

    fn settle(
        &self,
        token: u64,
        new_offset: i64,
        page: Option<Vec<Asset>>,
        cancelled: bool,
    ) -> LoadOutcome {
        let mut inner = self.inner.lock();
        let current = inner.in_flight == Some(token) && !inner.torn_down;
        if inner.in_flight == Some(token) {
            inner.in_flight = None;
            inner.state.is_loading = false;
        }

        if cancelled {
            log::info!("feed.load_cancelled generation={}", token);
            return LoadOutcome::Cancelled;
        }

        match page {
            None => LoadOutcome::Failed,
            Some(_) if !current => {
                log::info!("feed.load_discarded generation={}", token);
                LoadOutcome::Discarded
            }
            Some(assets) => {
                let appended = inner.state.apply_page(assets, new_offset);
                log::info!(
                    "feed.load_applied generation={} appended={} total={} offset={} has_more={}",
                    token,
                    appended,
                    inner.state.len(),
                    inner.state.offset,
                    inner.state.has_more
                );
                LoadOutcome::Applied { appended }
            }
        }
    }

    /// Ends the feed's lifetime. Pending loads stop waiting and drop their
    /// results; later calls do nothing.
    pub fn teardown(&self) {
        {
            let mut inner = self.inner.lock();
            if inner.torn_down {
                return;
            }
            inner.torn_down = true;
            inner.in_flight = None;
            inner.state.is_loading = false;
        }
        self.shutdown.send_replace(true);
        log::info!("feed.teardown");
    }
}

/// Runs one `load_next_page` on the runtime without waiting for it.
pub fn spawn_load(feed: &Arc<PaginatedAssetFeed>, handle: &Handle, trigger: &'static str) {
    let feed = Arc::clone(feed);
    handle.spawn(async move {
        let outcome = feed.load_next_page().await;
        log::debug!("feed.load_done trigger={} outcome={:?}", trigger, outcome);
    });
}
