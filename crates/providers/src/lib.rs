// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tiered data-acquisition providers for Auditgen.
//!
//! Everything that produces data for a report lives here, arranged as
//! fallback chains that always yield a value:
//!
//! - [`payload`] - metric-category response shapes
//! - [`synthetic`] - randomized payloads matching the live shapes
//! - [`live`] - the live metrics service interface
//! - [`tiered`] - live-then-synthetic selection per category
//! - [`store`] - the read-only persisted key-value store interface
//! - [`audit`] - embedded/stored/default audit-results resolution
//!
//! # Example
//!
//! ```no_run
//! use auditgen_providers::audit::AuditDataResolver;
//! use auditgen_providers::store::MemoryStore;
//! use std::sync::Arc;
//!
//! # let customer: auditgen_core::CustomerRecord = todo!();
//! let resolver = AuditDataResolver::new(Arc::new(MemoryStore::new()));
//! let resolved = resolver.resolve(&customer);
//! println!("audit served from {} tier", resolved.source);
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod audit;
pub mod live;
pub mod payload;
pub mod store;
pub mod synthetic;
pub mod tiered;

pub use audit::{default_audit_result, AuditDataResolver};
pub use live::{MetricsService, MetricsServiceError};
pub use store::{KeyValueStore, MemoryStore};
pub use synthetic::{competitor_samples, SyntheticMetricsProvider};
pub use tiered::TieredResolver;
