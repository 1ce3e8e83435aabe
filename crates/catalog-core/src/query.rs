//! # Query Module
//!
//! The ephemeral query value the store evaluates: filter, sort and page.
//!
//! ## Sort Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sortBy        sortDir         →  key         direction                 │
//! │  ──────────    ────────────       ─────────   ─────────                 │
//! │  (none)        (none)          →  createdAt   DESC   ← DEFAULT_SORT     │
//! │  (none)        asc | desc      →  createdAt   as given                  │
//! │  known key     (none/invalid)  →  that key    ASC                       │
//! │  unknown       (none/invalid)  →  createdAt   ASC                       │
//! │  any           asc | desc      →  resolved    as given                  │
//! │  (none)        invalid         →  createdAt   ASC                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The first row is the "most recent first" browsing default. Every other
//! row falls back to ascending when the direction is missing or unknown.
//!
//! ## Page Coercion
//! - `page` below 1 becomes 1
//! - `page_size` is clamped into `[1, MAX_PAGE_SIZE]`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::price::Price;
use crate::types::Item;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller can get.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort applied when neither key nor direction is supplied.
pub const DEFAULT_SORT: SortOrder = SortOrder {
    key: SortKey::CreatedAt,
    direction: SortDirection::Descending,
};

// =============================================================================
// Sort Key
// =============================================================================

/// Field a query is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Case-insensitive name order.
    Name,
    /// Numeric price order.
    Price,
    /// Creation timestamp order.
    #[default]
    CreatedAt,
}

impl SortKey {
    /// Parses a key name, ignoring case. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "price" => Some(SortKey::Price),
            "createdat" => Some(SortKey::CreatedAt),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Name => write!(f, "name"),
            SortKey::Price => write!(f, "price"),
            SortKey::CreatedAt => write!(f, "createdAt"),
        }
    }
}

// =============================================================================
// Sort Direction
// =============================================================================

/// Ascending or descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Parses `asc` / `desc`, ignoring case. Anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

// =============================================================================
// Sort Order
// =============================================================================

/// A resolved (key, direction) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        DEFAULT_SORT
    }
}

impl SortOrder {
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        SortOrder { key, direction }
    }

    /// Resolves raw `sortBy` / `sortDir` values per the table in the module docs.
    ///
    /// Blank strings count as absent.
    pub fn resolve(sort_by: Option<&str>, sort_dir: Option<&str>) -> Self {
        let sort_by = sort_by.filter(|s| !s.trim().is_empty());
        let sort_dir = sort_dir.filter(|s| !s.trim().is_empty());

        if sort_by.is_none() && sort_dir.is_none() {
            return DEFAULT_SORT;
        }

        SortOrder {
            key: sort_by.and_then(SortKey::parse).unwrap_or(SortKey::CreatedAt),
            direction: sort_dir
                .and_then(SortDirection::parse)
                .unwrap_or(SortDirection::Ascending),
        }
    }

    /// Compares two items under this order.
    ///
    /// Equal keys return `Ordering::Equal` so a stable sort keeps the
    /// original relative order for ties, in both directions.
    pub fn compare(&self, a: &Item, b: &Item) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => a
                .name
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.name.chars().flat_map(char::to_lowercase)),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

// =============================================================================
// Page Coercion
// =============================================================================

/// Floors a requested page number at 1.
pub fn clamp_page(page: i64) -> u32 {
    page.clamp(1, u32::MAX as i64) as u32
}

/// Clamps a requested page size into `[1, MAX_PAGE_SIZE]`.
pub fn clamp_page_size(page_size: i64) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE as i64) as u32
}

// =============================================================================
// Item Query
// =============================================================================

/// Filter + sort + page request evaluated by the store.
///
/// Built with chained setters; page values are coerced on the way in so a
/// constructed query is always in range.
///
/// ## Example
/// ```rust
/// use catalog_core::query::{ItemQuery, SortKey, SortDirection, SortOrder};
///
/// let query = ItemQuery::new()
///     .search("mouse")
///     .sort(SortOrder::new(SortKey::Price, SortDirection::Descending))
///     .page(0)          // coerced to 1
///     .page_size(500);  // coerced to 100
///
/// assert_eq!(query.current_page(), 1);
/// assert_eq!(query.current_page_size(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    term: Option<String>,
    min_price: Option<Price>,
    max_price: Option<Price>,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
    sort: SortOrder,
    page: u32,
    page_size: u32,
}

impl Default for ItemQuery {
    fn default() -> Self {
        ItemQuery {
            term: None,
            min_price: None,
            max_price: None,
            created_from: None,
            created_to: None,
            sort: DEFAULT_SORT,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ItemQuery {
    /// A query matching everything, newest first, first page of 20.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the substring filter. The term is trimmed, lowercased and
    /// dropped entirely when blank.
    pub fn search(mut self, term: impl AsRef<str>) -> Self {
        let term = term.as_ref().trim();
        self.term = (!term.is_empty()).then(|| term.to_lowercase());
        self
    }

    /// Inclusive lower price bound.
    pub fn min_price(mut self, price: Option<Price>) -> Self {
        self.min_price = price;
        self
    }

    /// Inclusive upper price bound.
    pub fn max_price(mut self, price: Option<Price>) -> Self {
        self.max_price = price;
        self
    }

    /// Inclusive creation-time range; either end may be open.
    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_from = from;
        self.created_to = to;
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Requested 1-based page; values below 1 become 1.
    pub fn page(mut self, page: i64) -> Self {
        self.page = clamp_page(page);
        self
    }

    /// Requested page size; clamped into `[1, 100]`.
    pub fn page_size(mut self, page_size: i64) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort
    }

    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn current_page_size(&self) -> u32 {
        self.page_size
    }

    /// Half-open index range `[start, end)` of the page within a result set.
    pub fn page_bounds(&self) -> (usize, usize) {
        let size = self.page_size as usize;
        let start = (self.page as usize - 1).saturating_mul(size);
        (start, start.saturating_add(size))
    }

    /// True when `item` passes every filter in this query.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(term) = &self.term {
            if !item.matches_term(term) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| item.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| item.price > max) {
            return false;
        }
        if self.created_from.is_some_and(|from| item.created_at < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| item.created_at > to) {
            return false;
        }
        true
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
