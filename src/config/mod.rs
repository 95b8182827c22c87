pub mod settings;

pub use settings::Settings;

use ratatui::style::palette::tailwind;

pub const PALETTES: [tailwind::Palette; 4] = [
    tailwind::BLUE,
    tailwind::EMERALD,
    tailwind::INDIGO,
    tailwind::RED,
];

pub const INFO_TEXT: [&str; 2] = [
    "(Esc) quit | (↑/↓) move row | (PgUp/PgDn) page | (g/G) top/bottom | (m) load more",
    "(i) toggle icon url | (Shift + →/←) cycle color",
];

pub const ITEM_HEIGHT: usize = 1;
pub const POLL_DURATION_MS: u64 = 50;

// Feed defaults
pub const ITEMS_PER_PAGE: usize = 10;
pub const DEFAULT_EXPECTED_TOTAL: usize = 200;
pub const MIN_LOADING_DISPLAY_MS: u64 = 2000;
// 350px prefetch distance over ~40px rows
pub const PREFETCH_THRESHOLD_ROWS: usize = 9;
pub const INFINITE_SCROLL_PAGE_START: usize = 0;
pub const LOADING_PLACEHOLDER: &str = "Loading...";

// HTTP
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const LOG_FILE_PATH: &str = "/tmp/coins_debug.log";
