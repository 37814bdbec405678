// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Live metrics service interface.
//!
//! The live service is an external collaborator: a capability-gated set of
//! calls, one per metric category. This crate only defines the interface
//! and the error taxonomy; wiring an actual HTTP client behind it (and
//! authenticating to it) is the embedding application's concern.

use crate::payload::{
    BacklinksSummary, CompetitorMetrics, KeywordRankings, LighthouseScores, TechnicalSeoPage,
};
use async_trait::async_trait;
use thiserror::Error;

/// Errors a live metrics call can surface.
///
/// The tiered resolver never propagates these to its caller; they are
/// logged and demoted to the synthetic tier.
#[derive(Debug, Error)]
pub enum MetricsServiceError {
    /// The request never completed (DNS, connect, timeout upstream).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {0}")]
    Status(u16),

    /// The response body did not match the category's payload shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Result type for live metrics calls.
pub type Result<T> = std::result::Result<T, MetricsServiceError>;

/// One call per metric category against the live metrics service.
///
/// Implementations take a URL or domain target and return the
/// category-specific response shape from [`crate::payload`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Lighthouse category scores for a page.
    async fn lighthouse(&self, url: &str) -> Result<LighthouseScores>;

    /// Backlink profile summary for a domain.
    async fn backlinks(&self, domain: &str) -> Result<BacklinksSummary>;

    /// Ranked keywords for a domain.
    async fn keywords(&self, domain: &str) -> Result<KeywordRankings>;

    /// Competing domains and their organic metrics.
    async fn competitors(&self, domain: &str) -> Result<CompetitorMetrics>;

    /// On-page technical SEO metrics.
    async fn technical(&self, url: &str) -> Result<TechnicalSeoPage>;
}
