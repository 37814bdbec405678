// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Customer and audit data model.
//!
//! Wire names are camelCase because customer files and persisted audit
//! records predate this implementation and already use that shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer as supplied by the caller. Read-only to the core; the
/// identity key is [`CustomerRecord::id`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    /// Stable customer identifier, used to match persisted audit records.
    pub id: String,
    /// Display name substituted into the report.
    pub company_name: String,
    /// Website URL, possibly with scheme and trailing slash.
    pub website: String,
    /// Industry label; absent fields leave the template's example text alone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Market/location label, same conditional treatment as `industry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Competitor website URLs, one chart entry each.
    #[serde(default)]
    pub competitors: Vec<String>,
    /// Embedded audit results. When present this is the highest-priority
    /// data source and is used verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_data: Option<AuditResult>,
}

/// A full set of audit results for one report run. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// Overall SEO health score, 0-100.
    pub overall_score: f64,
    /// Issue counts by severity.
    pub issues: IssueCounts,
    /// Number of pages crawled.
    pub page_count: u32,
    /// Performance measurements.
    pub performance: PerformanceMetrics,
    /// Technical SEO element presence flags.
    pub seo: SeoFlags,
    /// Website URL as supplied on the customer record.
    pub website: String,
    /// Normalized domain (scheme and trailing slash stripped).
    pub domain: String,
    /// When the audit was produced.
    pub audit_date: DateTime<Utc>,
}

/// Issue counts by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCounts {
    /// Issues requiring immediate action.
    pub critical: u32,
    /// Issues to address soon.
    pub major: u32,
    /// Issues that can be improved over time.
    pub minor: u32,
}

/// Performance measurements for a site.
///
/// No ordering between desktop and mobile scores is assumed; real data may
/// have mobile outscore desktop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Desktop Lighthouse-style score, 0-100.
    pub desktop_score: u32,
    /// Mobile Lighthouse-style score, 0-100.
    pub mobile_score: u32,
    /// Average page load time in seconds, kept as the decimal string the
    /// template renders (e.g. "1.8").
    pub load_time: String,
    /// Largest Contentful Paint, seconds.
    pub lcp: f64,
    /// First Input Delay, milliseconds.
    pub fid: f64,
    /// Cumulative Layout Shift.
    pub cls: f64,
    /// First Contentful Paint, seconds.
    pub fcp: f64,
    /// Time To First Byte, seconds.
    pub ttfb: f64,
}

/// Presence flags for technical SEO elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoFlags {
    /// Meta descriptions present.
    pub meta_tags: bool,
    /// Heading hierarchy is sound.
    pub heading_structure: bool,
    /// URLs are clean and descriptive.
    pub url_structure: bool,
    /// Images carry alt attributes.
    pub image_alt_tags: bool,
    /// Internal linking is adequate.
    pub internal_linking: bool,
    /// Structured data / schema markup present.
    pub schema_markup: bool,
    /// robots.txt present.
    pub robots_txt: bool,
    /// XML sitemap present.
    pub sitemap: bool,
}

/// A competitor entry for the report's comparison chart.
///
/// Derived 1:1 from [`CustomerRecord::competitors`] and regenerated with
/// fresh randomization on every report run, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitorSample {
    /// Normalized competitor domain.
    pub name: String,
    /// Comparison score, drawn from [65, 89].
    pub score: u32,
    /// Estimated monthly traffic, drawn from [5000, 14999].
    pub traffic: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_audit() -> AuditResult {
        AuditResult {
            overall_score: 83.0,
            issues: IssueCounts {
                critical: 6,
                major: 8,
                minor: 23,
            },
            page_count: 15,
            performance: PerformanceMetrics {
                desktop_score: 77,
                mobile_score: 56,
                load_time: "1.8".to_string(),
                lcp: 2.5,
                fid: 100.0,
                cls: 0.1,
                fcp: 1.8,
                ttfb: 0.8,
            },
            seo: SeoFlags {
                meta_tags: true,
                heading_structure: true,
                url_structure: true,
                image_alt_tags: false,
                internal_linking: true,
                schema_markup: false,
                robots_txt: true,
                sitemap: true,
            },
            website: "https://acme.test/".to_string(),
            domain: "acme.test".to_string(),
            audit_date: Utc::now(),
        }
    }

    #[test]
    fn test_audit_result_round_trips_camel_case() {
        let audit = sample_audit();
        let json = serde_json::to_value(&audit).unwrap();
        assert!(json.get("overallScore").is_some());
        assert!(json.get("pageCount").is_some());
        assert!(json["performance"].get("desktopScore").is_some());
        assert!(json["seo"].get("imageAltTags").is_some());

        let back: AuditResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, audit);
    }

    #[test]
    fn test_customer_record_optional_fields_default() {
        let customer: CustomerRecord = serde_json::from_str(
            r#"{"id":"c1","companyName":"Acme Co","website":"https://acme.test/"}"#,
        )
        .unwrap();
        assert!(customer.industry.is_none());
        assert!(customer.location.is_none());
        assert!(customer.competitors.is_empty());
        assert!(customer.audit_data.is_none());
    }

    #[test]
    fn test_customer_record_parses_embedded_audit_data() {
        let mut json = serde_json::json!({
            "id": "c1",
            "companyName": "Acme Co",
            "website": "https://acme.test/",
        });
        json["auditData"] = serde_json::to_value(sample_audit()).unwrap();

        let customer: CustomerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(customer.audit_data.unwrap().overall_score, 83.0);
    }
}
