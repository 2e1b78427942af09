//! # sdwa-pack — Regulatory Pack
//!
//! Encodes the regulatory configuration the violation engine evaluates
//! against as a machine-readable pack:
//!
//! - **Limit table** (`limits.rs`): one [`RegulatoryLimit`] per regulated
//!   parameter, carrying the MCL or action level, notification tier, unit,
//!   and the severity threshold multiplier.
//!
//! - **Requirement table** (`requirements.rs`): one
//!   [`NotificationRequirement`] per tier, carrying the public-notice
//!   deadline and the ordered media channels.
//!
//! - **EPA defaults** (`epa.rs`): the built-in federal table.
//!
//! - **Pack loading** (`pack.rs`): YAML pack files that extend or override
//!   the defaults, validated on load (`validation.rs`).
//!
//! ## Crate Policy
//!
//! - Depends only on `sdwa-core` internally.
//! - A [`RegulatoryPack`] is loaded once and never mutated afterwards;
//!   every consumer takes it by shared reference.
//! - Severity thresholds are named configuration, never inline literals.

pub mod epa;
pub mod error;
pub mod limits;
pub mod pack;
pub mod requirements;
pub mod validation;

pub use error::{PackError, PackResult};
pub use limits::{LimitKind, LimitTable, RegulatoryLimit, SeverityRationale, DEFAULT_HIGH_THRESHOLD};
pub use pack::{PackBase, PackFile, RegulatoryPack};
pub use requirements::{Deadline, DeadlineUnit, NotificationRequirement, RequirementTable};
pub use validation::{validate_pack, PackValidationResult, MAX_DEADLINE_DAYS};
