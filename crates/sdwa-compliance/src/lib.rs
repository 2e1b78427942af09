//! # sdwa-compliance — Violation Detection and Public Notification
//!
//! The rule engine proper. Four stages, each a pure function of its inputs:
//!
//! ```text
//! samples ─▶ detect ─▶ assess ─▶ generate ─▶ assemble
//!            Findings  SeverityMap  Notices   FederalReport
//! ```
//!
//! - **Detector** (`detector.rs`): compares each sample with its
//!   [`RegulatoryLimit`](sdwa_pack::RegulatoryLimit) and emits findings.
//! - **Severity** (`severity.rs`): one [`SeverityAssessment`] per violated
//!   parameter.
//! - **Notices** (`notice.rs`): one templated [`Notice`] per violated
//!   parameter, carrying the tier's deadline and media channels.
//! - **Federal report** (`report.rs`): flat [`FederalReport`] with
//!   immediate and long-term action lists.
//!
//! Around the stages:
//!
//! - **Data quality** (`quality.rs`): scores a laboratory export before
//!   it is interpreted.
//! - **Narrative** (`narrative.rs`): optional [`NarrativeEnricher`] hook
//!   for prose summaries; the engine never requires one.
//! - **Pipeline** (`pipeline.rs`): [`run_analysis`] threads the stages and
//!   returns an [`AnalysisOutcome`].
//!
//! ## Key Design Principles
//!
//! 1. **No `Result` in the stages.** Bad samples degrade to fewer
//!    findings, logged through `tracing`. Only the narrative hook is
//!    fallible, and its failure is logged and dropped.
//!
//! 2. **Absence means compliant.** A parameter without findings appears in
//!    no severity map, notice map, or report entry.
//!
//! 3. **Deterministic output.** Every map is a `BTreeMap`; the only date
//!    in the report is the caller-supplied report date. Two runs over the
//!    same inputs serialize to identical bytes.
//!
//! ## Crate Policy
//!
//! - Depends on `sdwa-core` and `sdwa-pack` only.
//! - No I/O. Reading lab files and writing reports belongs to the caller.

pub mod detector;
pub mod narrative;
pub mod notice;
pub mod pipeline;
pub mod quality;
pub mod report;
pub mod severity;
pub mod summary;

pub use detector::{detect, detect_with_stats, DetectionStats};
pub use narrative::{NarrativeEnricher, NarrativeError, NarrativeRequest, NoNarrative, SummaryNarrative};
pub use notice::{generate, Notice, Notices};
pub use pipeline::{run_analysis, run_analysis_with, AnalysisOutcome};
pub use quality::{validate_data_quality, QualityReport, REQUIRED_COLUMNS};
pub use report::{assemble, FederalReport, ReportedViolation};
pub use severity::{assess, SeverityAssessment, SeverityMap};
pub use summary::render_summary;
