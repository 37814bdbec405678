// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tiered metric-category resolution.
//!
//! [`TieredResolver`] is a pure selection strategy over two tiers: the
//! live metrics service (when configured and enabled) and the synthetic
//! provider. Any live error is logged and demoted to the synthetic tier;
//! the caller always receives a payload, tagged with the tier that served
//! it. There are no retries, no backoff and no caching of the decision —
//! every call re-evaluates the capability and re-attempts the live path.

use crate::live::{MetricsService, MetricsServiceError};
use crate::payload::{
    BacklinksSummary, CompetitorMetrics, KeywordRankings, LighthouseScores, TechnicalSeoPage,
};
use crate::synthetic::SyntheticMetricsProvider;
use auditgen_core::{MetricsSource, Sourced};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves metric categories against the live service with a synthetic
/// fallback.
///
/// Live availability is an explicit construction-time choice: a service
/// handle plus an enabled flag, not a runtime probe for a well-known
/// function name.
#[derive(Clone)]
pub struct TieredResolver {
    live: Option<Arc<dyn MetricsService>>,
    live_enabled: bool,
    synthetic: SyntheticMetricsProvider,
}

impl TieredResolver {
    /// A resolver with no live service; every call is served synthetically.
    pub fn synthetic_only(synthetic: SyntheticMetricsProvider) -> Self {
        Self {
            live: None,
            live_enabled: false,
            synthetic,
        }
    }

    /// A resolver that attempts the live service first.
    pub fn with_live(
        live: Arc<dyn MetricsService>,
        live_enabled: bool,
        synthetic: SyntheticMetricsProvider,
    ) -> Self {
        Self {
            live: Some(live),
            live_enabled,
            synthetic,
        }
    }

    /// Resolve Lighthouse scores for a page.
    pub async fn lighthouse(&self, url: &str) -> Sourced<LighthouseScores, MetricsSource> {
        match self.try_live("lighthouse", |live| live.lighthouse(url)).await {
            Some(payload) => Sourced::new(payload, MetricsSource::Live),
            None => Sourced::new(self.synthetic.lighthouse(url).await, MetricsSource::Synthetic),
        }
    }

    /// Resolve the backlink profile for a domain.
    pub async fn backlinks(&self, domain: &str) -> Sourced<BacklinksSummary, MetricsSource> {
        match self.try_live("backlinks", |live| live.backlinks(domain)).await {
            Some(payload) => Sourced::new(payload, MetricsSource::Live),
            None => Sourced::new(
                self.synthetic.backlinks(domain).await,
                MetricsSource::Synthetic,
            ),
        }
    }

    /// Resolve keyword rankings for a domain.
    pub async fn keywords(&self, domain: &str) -> Sourced<KeywordRankings, MetricsSource> {
        match self.try_live("keywords", |live| live.keywords(domain)).await {
            Some(payload) => Sourced::new(payload, MetricsSource::Live),
            None => Sourced::new(
                self.synthetic.keywords(domain).await,
                MetricsSource::Synthetic,
            ),
        }
    }

    /// Resolve competing-domain metrics.
    pub async fn competitors(&self, domain: &str) -> Sourced<CompetitorMetrics, MetricsSource> {
        match self
            .try_live("competitors", |live| live.competitors(domain))
            .await
        {
            Some(payload) => Sourced::new(payload, MetricsSource::Live),
            None => Sourced::new(
                self.synthetic.competitors(domain).await,
                MetricsSource::Synthetic,
            ),
        }
    }

    /// Resolve on-page technical SEO metrics.
    pub async fn technical(&self, url: &str) -> Sourced<TechnicalSeoPage, MetricsSource> {
        match self.try_live("technical", |live| live.technical(url)).await {
            Some(payload) => Sourced::new(payload, MetricsSource::Live),
            None => Sourced::new(self.synthetic.technical(url).await, MetricsSource::Synthetic),
        }
    }

    /// Attempt the live tier. `None` means the caller must fall back, either
    /// because the live path is unavailable or because the call failed.
    async fn try_live<'a, T, Fut>(
        &'a self,
        category: &'static str,
        call: impl FnOnce(&'a (dyn MetricsService + 'static)) -> Fut,
    ) -> Option<T>
    where
        Fut: Future<Output = Result<T, MetricsServiceError>> + 'a,
    {
        if !self.live_enabled {
            debug!(category, "live tier disabled, serving synthetic data");
            return None;
        }
        let live = match self.live.as_deref() {
            Some(live) => live,
            None => {
                debug!(category, "no live service configured, serving synthetic data");
                return None;
            }
        };
        match call(live).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!(category, error = %err, "live metrics call failed, demoting to synthetic tier");
                None
            }
        }
    }
}
