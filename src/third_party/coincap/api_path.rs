use const_format::concatcp;

// Root
pub const COINCAP_API_URL: &str = "https://api.coincap.io";
pub const COINCAP_ICON_URL: &str = "https://assets.coincap.io";

// Paths
pub const COINCAP_ASSETS_API_PATH: &str = "/v2/assets";
pub const COINCAP_ICON_PATH: &str = "/assets/icons/";
pub const COINCAP_ICON_SUFFIX: &str = "@2x.png";

// Endpoints
pub const COINCAP_ASSETS_API: &str = concatcp!(COINCAP_API_URL, COINCAP_ASSETS_API_PATH);
pub const COINCAP_ICON_BASE: &str = concatcp!(COINCAP_ICON_URL, COINCAP_ICON_PATH);
