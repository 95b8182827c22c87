use crate::data::Asset;

/// Everything the feed knows. Only [`PaginatedAssetFeed`](super::PaginatedAssetFeed)
/// mutates it; the UI works on clones.
#[derive(Clone, Debug)]
pub struct FeedState {
    pub items: Vec<Asset>,
    /// Start index of the last applied page. Begins one page below zero.
    pub offset: i64,
    pub page_size: usize,
    pub expected_total: usize,
    pub is_loading: bool,
    pub has_more: bool,
}

impl FeedState {
    pub fn new(page_size: usize, expected_total: usize) -> Self {
        Self {
            items: Vec::new(),
            offset: -(page_size as i64),
            page_size,
            expected_total,
            is_loading: false,
            has_more: true,
        }
    }

    pub fn next_offset(&self) -> i64 {
        self.offset + self.page_size as i64
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a page fetched at `new_offset` and advances the cursor.
    /// Returns how many assets were added.
    pub(super) fn apply_page(&mut self, assets: Vec<Asset>, new_offset: i64) -> usize {
        let appended = assets.len();
        self.items.extend(assets);
        if self.items.len() >= self.expected_total {
            self.has_more = false;
        }
        self.offset = new_offset;
        appended
    }
}
