use crate::config::{INFINITE_SCROLL_PAGE_START, LOADING_PLACEHOLDER, PREFETCH_THRESHOLD_ROWS};

/// Scroll position of the list, in rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportMetrics {
    /// First visible row.
    pub scroll_offset: usize,
    /// Rows that fit on screen.
    pub viewport_height: usize,
    /// Rows in the whole list.
    pub document_height: usize,
}

impl ViewportMetrics {
    pub fn at_document_bottom(&self) -> bool {
        self.scroll_offset + self.viewport_height >= self.document_height
    }

    /// Rows between the bottom of the viewport and the end of the list.
    pub fn rows_below_viewport(&self) -> usize {
        self.document_height
            .saturating_sub(self.scroll_offset + self.viewport_height)
    }
}

type LoadCallback = Box<dyn FnMut() + Send>;
type PagedLoadCallback = Box<dyn FnMut(usize) + Send>;

/// Fires its callback on every scroll that reaches the bottom of the list.
pub struct ScrollListener {
    on_bottom: Option<LoadCallback>,
}

impl ScrollListener {
    pub fn attach(on_bottom: impl FnMut() + Send + 'static) -> Self {
        Self {
            on_bottom: Some(Box::new(on_bottom)),
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.on_bottom.is_some()
    }

    pub fn detach(&mut self) {
        self.on_bottom = None;
    }

    pub fn on_scroll(&mut self, metrics: ViewportMetrics) -> bool {
        match self.on_bottom.as_mut() {
            Some(load) if metrics.at_document_bottom() => {
                load();
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfiniteScrollConfig {
    pub page_start: usize,
    /// Prefetch once fewer rows than this remain below the viewport.
    pub threshold_rows: usize,
    /// Check proximity on mount and after every load that adds rows.
    pub initial_load: bool,
    pub loader: &'static str,
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self {
            page_start: INFINITE_SCROLL_PAGE_START,
            threshold_rows: PREFETCH_THRESHOLD_ROWS,
            initial_load: true,
            loader: LOADING_PLACEHOLDER,
        }
    }
}

/// Threshold-based "load more" driver.
///
/// Once it fires it stays quiet until the load it asked for settles, then
/// re-arms. With `initial_load` it also re-checks by itself when a settled
/// load changed the row count, so a list shorter than the viewport keeps
/// filling. A load that settles with no new rows is only retried on scroll.
pub struct InfiniteScroll {
    config: InfiniteScrollConfig,
    load_more: PagedLoadCallback,
    page_loaded: usize,
    armed: bool,
    mounted: bool,
    last_update: Option<(usize, bool)>,
}

impl InfiniteScroll {
    pub fn new(config: InfiniteScrollConfig, load_more: impl FnMut(usize) + Send + 'static) -> Self {
        let page_loaded = config.page_start;
        Self {
            config,
            load_more: Box::new(load_more),
            page_loaded,
            armed: false,
            mounted: false,
            last_update: None,
        }
    }

    pub fn config(&self) -> &InfiniteScrollConfig {
        &self.config
    }

    #[cfg(test)]
    pub fn pages_requested(&self) -> usize {
        self.page_loaded - self.config.page_start
    }

    pub fn mount(&mut self, has_more: bool, metrics: ViewportMetrics) -> bool {
        self.mounted = true;
        self.armed = has_more;
        self.last_update = Some((metrics.document_height, false));
        if self.config.initial_load {
            self.check(has_more, metrics)
        } else {
            false
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.armed = false;
    }

    pub fn on_scroll(&mut self, has_more: bool, metrics: ViewportMetrics) -> bool {
        self.check(has_more, metrics)
    }

    pub fn on_update(&mut self, has_more: bool, is_loading: bool, metrics: ViewportMetrics) -> bool {
        if !self.mounted {
            return false;
        }
        let key = (metrics.document_height, is_loading);
        let previous = self.last_update.replace(key);
        if previous == Some(key) {
            return false;
        }
        if is_loading {
            self.armed = false;
            return false;
        }
        self.armed = has_more;
        let rows_changed = previous.is_none_or(|(rows, _)| rows != metrics.document_height);
        if self.config.initial_load && rows_changed {
            self.check(has_more, metrics)
        } else {
            false
        }
    }

    fn check(&mut self, has_more: bool, metrics: ViewportMetrics) -> bool {
        if !self.mounted || !self.armed || !has_more {
            return false;
        }
        if metrics.rows_below_viewport() >= self.config.threshold_rows {
            return false;
        }
        self.armed = false;
        self.page_loaded += 1;
        (self.load_more)(self.page_loaded);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    fn metrics(scroll_offset: usize, viewport_height: usize, document_height: usize) -> ViewportMetrics {
        ViewportMetrics {
            scroll_offset,
            viewport_height,
            document_height,
        }
    }

    fn recording_scroll(threshold_rows: usize) -> (InfiniteScroll, Arc<Mutex<Vec<usize>>>) {
        let pages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pages);
        let scroll = InfiniteScroll::new(
            InfiniteScrollConfig {
                threshold_rows,
                ..InfiniteScrollConfig::default()
            },
            move |page| sink.lock().push(page),
        );
        (scroll, pages)
    }

    #[test]
    fn bottom_detection() {
        assert!(metrics(0, 20, 0).at_document_bottom());
        assert!(metrics(10, 20, 30).at_document_bottom());
        assert!(!metrics(9, 20, 30).at_document_bottom());
        assert_eq!(metrics(5, 20, 40).rows_below_viewport(), 15);
        assert_eq!(metrics(30, 20, 40).rows_below_viewport(), 0);
    }

    #[test]
    fn scroll_listener_fires_only_at_bottom_and_until_detached() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut listener = ScrollListener::attach(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!listener.on_scroll(metrics(0, 10, 50)));
        assert!(listener.on_scroll(metrics(40, 10, 50)));
        assert!(listener.on_scroll(metrics(40, 10, 50)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        listener.detach();
        assert!(!listener.is_attached());
        assert!(!listener.on_scroll(metrics(40, 10, 50)));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn initial_load_fires_on_mount() {
        let (mut scroll, pages) = recording_scroll(9);
        assert!(scroll.mount(true, metrics(0, 20, 0)));
        assert_eq!(*pages.lock(), vec![1]);
        assert_eq!(scroll.pages_requested(), 1);
    }

    #[test]
    fn no_initial_load_when_disabled() {
        let pages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pages);
        let mut scroll = InfiniteScroll::new(
            InfiniteScrollConfig {
                initial_load: false,
                ..InfiniteScrollConfig::default()
            },
            move |page| sink.lock().push(page),
        );

        assert!(!scroll.mount(true, metrics(0, 20, 0)));
        assert!(!scroll.on_update(true, false, metrics(0, 20, 0)));
        assert!(scroll.on_scroll(true, metrics(0, 20, 0)));
        assert_eq!(*pages.lock(), vec![1]);
    }

    #[test]
    fn disarms_after_firing_until_load_settles() {
        let (mut scroll, pages) = recording_scroll(9);
        assert!(scroll.mount(true, metrics(0, 20, 0)));

        assert!(!scroll.on_scroll(true, metrics(0, 20, 0)));

        // load in flight: stays disarmed
        assert!(!scroll.on_update(true, true, metrics(0, 20, 0)));
        assert!(!scroll.on_scroll(true, metrics(0, 20, 0)));

        // page landed, still near the end
        assert!(scroll.on_update(true, false, metrics(0, 20, 10)));
        assert!(!scroll.on_update(true, false, metrics(0, 20, 10)));

        assert_eq!(*pages.lock(), vec![1, 2]);
        assert_eq!(scroll.pages_requested(), 2);
    }

    #[test]
    fn empty_settle_rearms_for_scroll_only() {
        let (mut scroll, pages) = recording_scroll(9);
        assert!(scroll.mount(true, metrics(0, 20, 0)));
        assert!(!scroll.on_update(true, true, metrics(0, 20, 0)));

        // failed load: same rows, no automatic retry
        assert!(!scroll.on_update(true, false, metrics(0, 20, 0)));
        assert_eq!(*pages.lock(), vec![1]);

        assert!(scroll.on_scroll(true, metrics(0, 20, 0)));
        assert_eq!(*pages.lock(), vec![1, 2]);
    }

    #[test]
    fn threshold_controls_prefetch_distance() {
        let (mut scroll, pages) = recording_scroll(5);
        scroll.mount(true, metrics(0, 20, 100));
        assert!(pages.lock().is_empty());

        assert!(!scroll.on_scroll(true, metrics(75, 20, 100)));
        assert!(scroll.on_scroll(true, metrics(76, 20, 100)));
        assert_eq!(*pages.lock(), vec![1]);
    }

    #[test]
    fn has_more_gate_blocks_loading() {
        let (mut scroll, pages) = recording_scroll(9);
        assert!(!scroll.mount(false, metrics(0, 20, 0)));
        assert!(!scroll.on_scroll(false, metrics(0, 20, 0)));
        assert!(!scroll.on_update(false, false, metrics(0, 20, 200)));
        assert!(pages.lock().is_empty());
    }

    #[test]
    fn unmounted_scroll_is_inert() {
        let (mut scroll, pages) = recording_scroll(9);
        assert!(!scroll.on_scroll(true, metrics(0, 20, 0)));
        scroll.mount(true, metrics(0, 20, 40));
        scroll.unmount();
        assert!(!scroll.on_update(true, false, metrics(0, 20, 10)));
        assert!(pages.lock().is_empty());
    }
}
