use std::num::NonZeroUsize;

use serde::{Deserialize, Deserializer};

pub const QUESTIONS_PER_PAGE: usize = 10;

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Page(NonZeroUsize);

impl Page {
    pub const FIRST: Page = Page(NonZeroUsize::MIN);

    pub fn new(number: usize) -> Option<Self> {
        NonZeroUsize::new(number).map(Page)
    }

    /// Reads a page number from a query value. Anything that is not a positive
    /// integer falls back to the first page.
    pub fn parse_or_first(raw: &str) -> Self {
        raw.trim()
            .parse::<usize>()
            .ok()
            .and_then(Page::new)
            .unwrap_or_default()
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::FIRST
    }
}

// query strings arrive as text, and a bad page never rejects the request
impl<'de> Deserialize<'de> for Page {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .map(Page::parse_or_first)
            .unwrap_or_default())
    }
}

/// Returns the `[start, end)` window of `items` for `page`, empty past the end.
pub fn paginate<T>(items: &[T], page: Page, page_size: usize) -> &[T] {
    let start = (page.get() - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);
    if start >= items.len() {
        return &[];
    }
    &items[start..end.min(items.len())]
}
