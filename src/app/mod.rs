use crate::config::Settings;
use crate::feed::{InfiniteScroll, PaginatedAssetFeed, ScrollListener, spawn_load};
use crate::request::CoinCapClient;
use crate::ui::TuiApp;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use std::sync::Arc;
use tokio::runtime::Handle;

#[derive(Debug, Clone)]
pub struct App {
    settings: Settings,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(&self) -> Result<()> {
        let client = CoinCapClient::new(self.settings.api_url.clone())?;
        log::info!(
            "app.start api_url={} page_size={} expected_total={} min_loading_ms={}",
            client.assets_url(),
            self.settings.page_size,
            self.settings.expected_total,
            self.settings.min_loading_ms
        );

        let feed = Arc::new(PaginatedAssetFeed::new(
            Arc::new(client),
            self.settings.feed_settings(),
        ));
        let handle = Handle::current();

        // Trigger 1: bottom-of-list scroll events
        let scroll_listener = ScrollListener::attach({
            let feed = Arc::clone(&feed);
            let handle = handle.clone();
            move || spawn_load(&feed, &handle, "scroll")
        });

        // Trigger 2: threshold prefetch, also does the first load
        let infinite_scroll = InfiniteScroll::new(self.settings.infinite_scroll_config(), {
            let feed = Arc::clone(&feed);
            let handle = handle.clone();
            move |page| {
                log::debug!("infinite_scroll.load_more page={}", page);
                spawn_load(&feed, &handle, "infinite_scroll")
            }
        });

        let load_more = {
            let feed = Arc::clone(&feed);
            let handle = handle.clone();
            move || spawn_load(&feed, &handle, "explicit")
        };

        let ui_feed = Arc::clone(&feed);
        let ui_task = tokio::task::spawn_blocking(move || {
            let terminal = ratatui::init();
            let app = TuiApp::new(ui_feed, scroll_listener, infinite_scroll, load_more);
            let app_result = app.run(terminal);
            ratatui::restore();
            app_result
        });

        // Wait for UI to finish (user quits)
        let ui_result = ui_task.await;

        // Drop whatever is still in flight
        feed.teardown();

        match ui_result {
            Ok(result) => result,
            Err(e) => Err(eyre!("UI task failed: {}", e)),
        }
    }
}
