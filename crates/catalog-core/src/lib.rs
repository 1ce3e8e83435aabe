//! # catalog-core: Pure Domain Types for the Catalog Service
//!
//! This crate holds every type and rule the catalog shares between the
//! store and the request layer, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Service Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Transport adapter (HTTP router, not here)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                catalog-api (request layer)                      │   │
//! │  │    ItemsService, AuthService, TokenIssuer, TokenVerifier        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │   query   │  │ validation│  │   │
//! │  │   │   Item    │  │   Price   │  │ ItemQuery │  │   rules   │  │   │
//! │  │   │ ItemDraft │  │           │  │ SortOrder │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              catalog-store (in-memory item store)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, ItemDraft, PagedResult)
//! - [`price`] - Price type with integer arithmetic (no floating point!)
//! - [`query`] - Query value, sort tags and page coercion
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::query::{ItemQuery, SortOrder};
//!
//! // Raw values as they arrive from a query string
//! let sort = SortOrder::resolve(Some("price"), Some("desc"));
//! let query = ItemQuery::new().search("mouse").sort(sort).page(1).page_size(10);
//!
//! assert_eq!(query.term(), Some("mouse"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod price;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use price::Price;
pub use query::{ItemQuery, SortDirection, SortKey, SortOrder};
pub use types::*;
