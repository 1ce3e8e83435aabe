//! # Validation Module
//!
//! Input validation utilities for the catalog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization                                              │
//! │  ├── Price text must parse (non-negative, ≤ 2 decimals)                │
//! │  └── id / createdAt in payloads are dropped                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Request layer (catalog-api)                                  │
//! │  └── THIS MODULE: non-blank names, non-blank credentials               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store                                                        │
//! │  └── Trusts its input; never fails for a well-formed draft             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::validate_item_name;
//!
//! assert!(validate_item_name("Desk Lamp").is_ok());
//! assert!(validate_item_name("   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::price::Price;
use crate::types::ItemDraft;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects empty or whitespace-only values for `field`.
pub fn require_non_blank(value: &str, field: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    require_non_blank(name, "name")
}

/// Validates a create/update payload before it reaches the store.
///
/// Price is already non-negative by construction, so only the name needs
/// checking here.
pub fn validate_item_draft(draft: &ItemDraft) -> ValidationResult<()> {
    validate_item_name(&draft.name)
}

/// Parses an optional price bound such as `minPrice`.
///
/// Absent and blank values are treated as "no bound".
pub fn parse_price_bound(raw: Option<&str>, field: &str) -> ValidationResult<Option<Price>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(text) => Price::parse_field(text, field).map(Some),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
