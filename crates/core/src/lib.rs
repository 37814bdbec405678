// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core domain types for Auditgen.
//!
//! This crate defines the data model shared by the data-acquisition
//! providers and the report engine:
//!
//! - [`types`] - customer records, audit results and metric payload shapes
//! - [`provenance`] - source tagging for tiered resolution
//! - [`domain`] - website/domain string normalization

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod domain;
pub mod provenance;
pub mod types;

pub use domain::normalize_domain;
pub use provenance::{AuditSource, MetricsSource, Sourced, TemplateTier};
pub use types::{
    AuditResult, CompetitorSample, CustomerRecord, IssueCounts, PerformanceMetrics, SeoFlags,
};
