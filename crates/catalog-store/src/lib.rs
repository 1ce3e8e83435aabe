//! # catalog-store: In-Memory Item Store
//!
//! The authoritative item collection for the catalog service. Everything
//! lives in process memory; nothing survives a restart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Service Data Flow                         │
//! │                                                                         │
//! │  ItemsService::list / get / create / update / delete                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  catalog-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────────────────┐    ┌──────────────────┐     │   │
//! │  │   │          ItemStore           │    │    Seed data     │     │   │
//! │  │   │          (store.rs)          │    │    (seed.rs)     │     │   │
//! │  │   │                              │    │                  │     │   │
//! │  │   │ RwLock<BTreeMap<id, Item>>   │◄───│ Laptop, Mouse,   │     │   │
//! │  │   │ next_id counter              │    │ Keyboard         │     │   │
//! │  │   └──────────────────────────────┘    └──────────────────┘     │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog-core: ItemQuery::matches, SortOrder::compare, page bounds     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The store itself and its locking model
//! - [`seed`] - Starter catalog for development

// =============================================================================
// Module Declarations
// =============================================================================

pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use store::{Clock, ItemStore};
