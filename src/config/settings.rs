use std::time::Duration;

use clap::Parser;

use crate::config::{
    DEFAULT_EXPECTED_TOTAL, INFINITE_SCROLL_PAGE_START, ITEMS_PER_PAGE, LOG_FILE_PATH,
    MIN_LOADING_DISPLAY_MS, PREFETCH_THRESHOLD_ROWS,
};
use crate::feed::FeedSettings;
use crate::feed::InfiniteScrollConfig;
use crate::third_party::coincap::api_path::COINCAP_ASSETS_API;

fn parse_page_size(value: &str) -> Result<usize, String> {
    let size = value
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid page size: {e}"))?;
    if size == 0 {
        return Err("page size must be at least 1".to_string());
    }
    Ok(size)
}

/// Runtime configuration. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "coins", version, about = "Infinite-scrolling crypto asset table")]
pub struct Settings {
    /// Assets endpoint queried with `limit` and `offset`
    #[arg(long, env = "COINS_API_URL", default_value = COINCAP_ASSETS_API)]
    pub api_url: String,

    /// Number of assets requested per page
    #[arg(long, env = "COINS_PAGE_SIZE", default_value_t = ITEMS_PER_PAGE, value_parser = parse_page_size)]
    pub page_size: usize,

    /// Stop loading once this many assets are in the list
    #[arg(long, env = "COINS_EXPECTED_TOTAL", default_value_t = DEFAULT_EXPECTED_TOTAL)]
    pub expected_total: usize,

    /// Minimum time a page load keeps the loading row on screen
    #[arg(long, env = "COINS_MIN_LOADING_MS", default_value_t = MIN_LOADING_DISPLAY_MS)]
    pub min_loading_ms: u64,

    /// Prefetch when this many rows or fewer remain below the viewport
    #[arg(long, env = "COINS_THRESHOLD_ROWS", default_value_t = PREFETCH_THRESHOLD_ROWS)]
    pub threshold_rows: usize,

    /// Where log lines go while the terminal is taken by the UI
    #[arg(long, env = "COINS_LOG_FILE", default_value = LOG_FILE_PATH)]
    pub log_file: String,
}

impl Settings {
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            page_size: self.page_size,
            expected_total: self.expected_total,
            min_loading: Duration::from_millis(self.min_loading_ms),
        }
    }

    pub fn infinite_scroll_config(&self) -> InfiniteScrollConfig {
        InfiniteScrollConfig {
            page_start: INFINITE_SCROLL_PAGE_START,
            threshold_rows: self.threshold_rows,
            initial_load: true,
            ..InfiniteScrollConfig::default()
        }
    }
}
