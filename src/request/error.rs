use reqwest::StatusCode;

/// Everything that can go wrong fetching one page. The feed treats every
/// variant the same way: the page is lost and the cursor stays put.
#[derive(Debug, thiserror::Error)]
pub enum PageFetchError {
    /// Transport failure, timeout, or unreadable body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered with a non-2xx status.
    #[error("{url} returned {status}")]
    Status { status: StatusCode, url: String },

    /// Body was not the expected `{ "data": [...] }` shape.
    #[error("Malformed assets payload: {0}")]
    Decode(#[from] serde_json::Error),
}
