//! # Domain Types
//!
//! Core domain types used throughout the catalog.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ItemDraft     │   │      Item       │   │  PagedResult<T> │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (store)     │──►│  items          │       │
//! │  │  description    │   │  name           │   │  total_count    │       │
//! │  │  price          │   │  description    │   │  page           │       │
//! │  └─────────────────┘   │  price          │   │  page_size      │       │
//! │     (caller input)     │  created_at     │   └─────────────────┘       │
//! │                        └─────────────────┘      (per query)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Server-Assigned Fields
//! `id` and `created_at` exist only on [`Item`]. A draft has nowhere to put
//! them, so a client-supplied id or timestamp is dropped when the payload is
//! deserialized and can never reach the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::price::Price;

/// Store-assigned item identifier.
pub type ItemId = u64;

// =============================================================================
// Item
// =============================================================================

/// A priced, named catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, assigned by the store and never reused.
    pub id: ItemId,

    /// Display name (non-empty).
    pub name: String,

    /// Free-form description (may be empty).
    pub description: String,

    /// Non-negative fixed-point price.
    pub price: Price,

    /// When the item was created (immutable).
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Builds a stored item from a draft plus the server-assigned fields.
    pub fn from_draft(id: ItemId, draft: ItemDraft, created_at: DateTime<Utc>) -> Self {
        Item {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            created_at,
        }
    }

    /// Replaces the mutable fields with those of `draft`.
    ///
    /// `id` and `created_at` are untouched.
    pub fn apply(&mut self, draft: ItemDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
    }

    /// Case-insensitive substring match against name OR description.
    ///
    /// `needle` must already be lowercase.
    pub fn matches_term(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Item Draft
// =============================================================================

/// Caller-supplied item fields for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Price,
}

impl ItemDraft {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: Price) -> Self {
        ItemDraft {
            name: name.into(),
            description: description.into(),
            price,
        }
    }
}

// =============================================================================
// Paged Result
// =============================================================================

/// One page of a filtered and sorted result set.
///
/// Computed fresh per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// Items on the requested page, in sort order.
    pub items: Vec<T>,
    /// Number of items matching the filter, before pagination.
    pub total_count: usize,
    /// The 1-based page actually used (after clamping).
    pub page: u32,
    /// The page size actually used (after clamping).
    pub page_size: u32,
}

// =============================================================================
// Unit Tests
// =============================================================================
