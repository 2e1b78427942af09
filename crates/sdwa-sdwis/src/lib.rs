//! # sdwa-sdwis — Water System Records
//!
//! The boundary between the violation engine and whatever holds public
//! water system inventory records (the federal SDWIS service, a state
//! export, a saved JSON file).
//!
//! - **Normalization** (`normalize.rs`): [`normalize_system_record`] is the
//!   single place that knows the upper-case, lower-case and nested
//!   spellings regulators use for the same field.
//! - **Lookup** (`lookup.rs`): the [`SystemLookup`] trait, a cached-record
//!   implementation reading JSON files, an in-memory implementation, and
//!   [`lookup_or_placeholder`] which turns any failure into the caller's
//!   placeholder header.
//!
//! ## Crate Policy
//!
//! - Depends only on `sdwa-core` internally.
//! - A failed lookup never aborts an analysis. Errors are returned from
//!   [`SystemLookup::lookup`] and logged by [`lookup_or_placeholder`].
//! - No network client lives here; a live service is one more
//!   [`SystemLookup`] implementation.

pub mod error;
pub mod lookup;
pub mod normalize;

pub use error::LookupError;
pub use lookup::{lookup_or_placeholder, CachedRecordLookup, InMemoryLookup, SystemLookup};
pub use normalize::normalize_system_record;
