//! Adelante Catalog Core
//!
//! The pure, synchronous heart of the platform:
//! - The record filter engine (term + facet filtering, facet extraction)
//! - Locale handling and bilingual text
//! - Domain record types for every directory panel
//! - The seeded in-memory catalog snapshot
//!
//! Nothing in this crate performs I/O or holds mutable state; every
//! operation is a deterministic transformation of its inputs.

pub mod filter;
pub mod locale;
pub mod records;
pub mod seed;

// Re-export commonly used types
pub use filter::{distinct_facets, filter, Query};
pub use locale::{Locale, Localized};
pub use records::{Category, Mentor, Resource, RouteKind, Scholarship, TransitRoute};
pub use seed::Catalog;
