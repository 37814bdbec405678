// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Synthetic metrics provider.
//!
//! Produces plausible randomized payloads in the exact shape of the live
//! metrics service, one method per category. Every numeric field is drawn
//! independently and uniformly from a fixed, category-specific range; no
//! two calls are correlated, including calls for the same input. Each call
//! sleeps a configurable simulated latency before answering, which is the
//! only suspension point in this module.
//!
//! Generation is bounded-range random number drawing and cannot fail, which
//! is what makes this the terminal tier of the metrics fallback chain.

use crate::payload::{
    BacklinksSummary, CompetitorDomain, CompetitorMetrics, KeywordRanking, KeywordRankings,
    LighthouseScores, TechnicalSeoPage,
};
use auditgen_core::{normalize_domain, CompetitorSample};
use rand::Rng;
use std::time::Duration;

/// Sample keywords used for synthetic keyword rankings.
const SAMPLE_KEYWORDS: [&str; 6] = [
    "business solutions",
    "tools online",
    "ecommerce platform",
    "digital services",
    "web tools",
    "business software",
];

/// Sample domains used for synthetic competitor metrics.
const SAMPLE_COMPETITORS: [&str; 3] = ["competitor1.com", "competitor2.com", "competitor3.com"];

/// Generates synthetic metric payloads with a simulated service delay.
///
/// Inputs are not validated; a malformed URL or domain still yields a
/// syntactically valid payload.
#[derive(Debug, Clone)]
pub struct SyntheticMetricsProvider {
    delay: Duration,
}

impl Default for SyntheticMetricsProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(1000))
    }
}

impl SyntheticMetricsProvider {
    /// Create a provider with the given simulated latency per call.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a provider that answers immediately. Intended for tests and
    /// CLI dry runs.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Synthetic Lighthouse category scores for a page.
    pub async fn lighthouse(&self, _url: &str) -> LighthouseScores {
        self.simulate_delay().await;
        let mut rng = rand::thread_rng();
        LighthouseScores {
            performance: rng.gen_range(60..=90),
            accessibility: rng.gen_range(80..=100),
            best_practices: rng.gen_range(70..=95),
            seo: rng.gen_range(75..=95),
            pwa: rng.gen_range(30..=70),
        }
    }

    /// Synthetic backlink profile for a domain.
    pub async fn backlinks(&self, _domain: &str) -> BacklinksSummary {
        self.simulate_delay().await;
        let mut rng = rand::thread_rng();
        BacklinksSummary {
            referring_domains: rng.gen_range(50..550),
            backlinks: rng.gen_range(200..2200),
            referring_main_domains: rng.gen_range(30..330),
            referring_ips: rng.gen_range(40..440),
        }
    }

    /// Synthetic keyword rankings for a domain.
    pub async fn keywords(&self, _domain: &str) -> KeywordRankings {
        self.simulate_delay().await;
        let mut rng = rand::thread_rng();
        let items = SAMPLE_KEYWORDS
            .iter()
            .map(|keyword| KeywordRanking {
                keyword: (*keyword).to_string(),
                search_volume: rng.gen_range(100..5100),
                competition: rng.gen_range(0.0..1.0),
                cpc: rng.gen_range(0.0..3.0),
                rank_group: rng.gen_range(1..=50),
                rank_absolute: rng.gen_range(1..=50),
            })
            .collect();
        KeywordRankings { items }
    }

    /// Synthetic competing-domain metrics.
    pub async fn competitors(&self, _domain: &str) -> CompetitorMetrics {
        self.simulate_delay().await;
        let mut rng = rand::thread_rng();
        let items = SAMPLE_COMPETITORS
            .iter()
            .map(|target| CompetitorDomain {
                target: (*target).to_string(),
                organic_count: rng.gen_range(100..1100),
                etv: rng.gen_range(1000..11000),
                impressions_etv: rng.gen_range(5000..55000),
            })
            .collect();
        CompetitorMetrics { items }
    }

    /// Synthetic on-page technical SEO metrics.
    pub async fn technical(&self, _url: &str) -> TechnicalSeoPage {
        self.simulate_delay().await;
        let mut rng = rand::thread_rng();
        TechnicalSeoPage {
            title_length: rng.gen_range(30..70),
            title_pixel_width: rng.gen_range(400..600),
            description_length: rng.gen_range(120..180),
            description_pixel_width: rng.gen_range(600..900),
            h1_length: rng.gen_range(20..50),
            html_size: rng.gen_range(50_000..150_000),
            internal_links_count: rng.gen_range(10..60),
            external_links_count: rng.gen_range(5..25),
            images_count: rng.gen_range(5..35),
            scripts_count: rng.gen_range(3..18),
            stylesheets_count: rng.gen_range(2..12),
        }
    }

    async fn simulate_delay(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Generate one chart entry per competitor URL.
///
/// Names are normalized domains; score and traffic are drawn fresh on
/// every call, so repeated report runs get repeated randomization.
pub fn competitor_samples(competitors: &[String]) -> Vec<CompetitorSample> {
    let mut rng = rand::thread_rng();
    competitors
        .iter()
        .map(|url| CompetitorSample {
            name: normalize_domain(url),
            score: rng.gen_range(65..90),
            traffic: rng.gen_range(5000..15000),
        })
        .collect()
}
