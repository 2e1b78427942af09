//! # sdwa-core — Foundational Types for the Violation Engine
//!
//! This crate defines the vocabulary shared by every other crate in the
//! workspace: what a laboratory sample looks like, which parameters are
//! recognized, how notification tiers and severity levels are ordered, and
//! what a violation finding carries. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for domain primitives.** [`Parameter`] and [`Pwsid`] are
//!    validated at construction. A raw contaminant code such as `PB90` is
//!    normalized to `Lead` before it ever reaches the detector.
//!
//! 2. **Typed sample values.** [`SampleValue`] separates numeric results,
//!    presence/absence results, and unreadable input. The detector never
//!    parses strings.
//!
//! 3. **Sentinels are variants, not magic strings.** An acute violation is
//!    [`Exceedance::Acute`]; it serializes as `"ACUTE"` only at the edge.
//!
//! 4. **Ordered enums.** [`Tier`] and [`SeverityLevel`] implement `Ord` so
//!    the worst case is a plain `max()`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdwa-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod digest;
pub mod error;
pub mod finding;
pub mod identity;
pub mod parameter;
pub mod sample;
pub mod system;
pub mod temporal;
pub mod tier;

// Re-export primary types for ergonomic imports.
pub use digest::{content_digest, ContentDigest};
pub use error::{SdwaError, ValidationError};
pub use finding::{format_tenths, round_to_hundredths, Exceedance, Findings, Observed, ViolationFinding};
pub use identity::Pwsid;
pub use parameter::Parameter;
pub use sample::{LabRow, SampleRecord, SampleValue};
pub use system::{DataSource, SystemHeader};
pub use tier::{SeverityLevel, Tier};
