// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Template acquisition and merge engine for Auditgen reports.
//!
//! - [`template`] - four-tier template loading with an embedded terminal
//!   fallback
//! - [`merge`] - the ordered, typed merge rule set
//! - [`report`] - per-customer orchestration with provenance

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod merge;
pub mod report;
pub mod template;

pub use merge::{merge, merge_with_competitors};
pub use report::{GeneratedReport, ReportGenerator};
pub use template::{unresolved_tokens, TemplateLoader, EMBEDDED_TEMPLATE};
