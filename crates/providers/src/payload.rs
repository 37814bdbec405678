// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metric-category payload shapes.
//!
//! These are the response shapes of the live metrics service, one per
//! category. The synthetic provider produces the exact same shapes so a
//! caller never has to know which tier answered.

use serde::{Deserialize, Serialize};

/// Lighthouse-style category scores for a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LighthouseScores {
    /// Performance score, 0-100.
    pub performance: u32,
    /// Accessibility score, 0-100.
    pub accessibility: u32,
    /// Best-practices score, 0-100.
    pub best_practices: u32,
    /// SEO score, 0-100.
    pub seo: u32,
    /// PWA score, 0-100.
    pub pwa: u32,
}

/// Backlink profile summary for a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklinksSummary {
    /// Distinct referring domains.
    pub referring_domains: u32,
    /// Total backlinks.
    pub backlinks: u32,
    /// Distinct referring main domains.
    pub referring_main_domains: u32,
    /// Distinct referring IPs.
    pub referring_ips: u32,
}

/// Ranked keywords for a domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRankings {
    /// One entry per ranked keyword.
    pub items: Vec<KeywordRanking>,
}

/// A single ranked keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRanking {
    /// The keyword text.
    pub keyword: String,
    /// Monthly search volume.
    pub search_volume: u32,
    /// Competition index, 0.0-1.0.
    pub competition: f64,
    /// Cost per click, USD.
    pub cpc: f64,
    /// Rank among grouped results.
    pub rank_group: u32,
    /// Absolute rank.
    pub rank_absolute: u32,
}

/// Competing domains and their organic metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorMetrics {
    /// One entry per competing domain.
    pub items: Vec<CompetitorDomain>,
}

/// Organic metrics for one competing domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorDomain {
    /// The competing domain.
    pub target: String,
    /// Count of organic ranking keywords.
    pub organic_count: u32,
    /// Estimated traffic value.
    pub etv: u32,
    /// Estimated traffic value by impressions.
    pub impressions_etv: u32,
}

/// On-page technical SEO metrics for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalSeoPage {
    /// Title length in characters.
    pub title_length: u32,
    /// Title width in pixels.
    pub title_pixel_width: u32,
    /// Meta description length in characters.
    pub description_length: u32,
    /// Meta description width in pixels.
    pub description_pixel_width: u32,
    /// H1 length in characters.
    pub h1_length: u32,
    /// HTML document size in bytes.
    pub html_size: u32,
    /// Internal link count.
    pub internal_links_count: u32,
    /// External link count.
    pub external_links_count: u32,
    /// Image count.
    pub images_count: u32,
    /// Script count.
    pub scripts_count: u32,
    /// Stylesheet count.
    pub stylesheets_count: u32,
}
