// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Template merge engine.
//!
//! Applies an ordered set of typed merge rules to a template string. Each
//! rule names the field it sets and carries its anchors explicitly: either
//! a literal insertion token (`[OVERALL_SCORE]`) or a pattern over the
//! template's known example values, matched together with adjacent fixed
//! label text so an unrelated identical number elsewhere in the document
//! is never touched.
//!
//! A rule whose anchors are absent from the template is a silent no-op;
//! the engine degrades gracefully against template drift instead of
//! failing. Replacement text is always inserted literally, never expanded
//! against capture groups, so customer-supplied strings cannot inject
//! rewrite syntax.

use auditgen_core::{normalize_domain, AuditResult, CompetitorSample, CustomerRecord};
use auditgen_providers::synthetic::competitor_samples;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use tracing::debug;

// Mobile chart values are derived from desktop timings with fixed
// degradation factors when no measured mobile timings exist.
const MOBILE_LCP_FACTOR: f64 = 1.5;
const MOBILE_FID_FACTOR: f64 = 1.2;
const MOBILE_CLS_FACTOR: f64 = 1.3;
const MOBILE_FCP_FACTOR: f64 = 1.4;

static EXAMPLE_COMPANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"Promac Paints").unwrap());
static EXAMPLE_DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"promacpaints\.co\.za").unwrap());
static TITLE_ELEMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title>[^<]*</title>").unwrap());
static EXAMPLE_LONG_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Generated September \d+, \d+").unwrap());
static EXAMPLE_SHORT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"07/09/2025").unwrap());
static EXAMPLE_INDUSTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Manufacturing - Paint &(?:amp;)? Coatings").unwrap());
static EXAMPLE_LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"South Africa").unwrap());
static SCRIPT_OVERALL: Lazy<Regex> = Lazy::new(|| Regex::new(r"overallScore = 72\.4").unwrap());
static RENDERED_OVERALL: Lazy<Regex> = Lazy::new(|| Regex::new(r">72\.4<").unwrap());
static RENDERED_CRITICAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#">8</div>\s*<p class="text-xs text-gray-500">Immediate action required"#).unwrap()
});
static RENDERED_MAJOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#">15</div>\s*<p class="text-xs text-gray-500">Should be addressed soon"#).unwrap()
});
static RENDERED_MINOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#">23</div>\s*<p class="text-xs text-gray-500">Can be improved"#).unwrap()
});
static RENDERED_PAGES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#">12</div>\s*<p class="text-xs text-gray-500">Total pages crawled"#).unwrap()
});
static SCRIPT_DESKTOP: Lazy<Regex> = Lazy::new(|| Regex::new(r"desktopScore = 68").unwrap());
static RENDERED_DESKTOP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#">68</div>\s*</div>\s*<div class="text-xs text-gray-500">Desktop Score"#).unwrap()
});
static SCRIPT_MOBILE: Lazy<Regex> = Lazy::new(|| Regex::new(r"mobileScore = 53").unwrap());
static RENDERED_MOBILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#">53</div>\s*</div>\s*<div class="text-xs text-gray-500">Mobile Score"#).unwrap()
});
static RENDERED_LOAD_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r">2\.4s<").unwrap());
static LABELED_LOAD_TIME: Lazy<Regex> = Lazy::new(|| Regex::new(r"Load Time: 2\.4s").unwrap());
static EXAMPLE_META_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Meta descriptions missing on 5 pages").unwrap());
static EXAMPLE_SCHEMA_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"No structured data found").unwrap());
static EXAMPLE_ALT_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"32 images missing alt tags").unwrap());
static PERFORMANCE_DATA_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"const performanceData = \{[^}]+\}").unwrap());
static COMPETITOR_DATA_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"const competitorData = \[[^\]]+\]").unwrap());

/// One anchored substitution inside a [`MergeRule`].
enum Op {
    /// Replace every occurrence of a literal insertion token.
    Token {
        token: &'static str,
        value: String,
    },
    /// Replace every match of an example-value pattern. The value is
    /// inserted literally (no capture-group expansion).
    Replace {
        pattern: &'static Lazy<Regex>,
        value: String,
    },
}

/// A named merge rule: the field it sets plus the anchors that set it.
struct MergeRule {
    name: &'static str,
    ops: Vec<Op>,
}

impl MergeRule {
    fn apply(&self, text: String) -> String {
        let mut out = text;
        for op in &self.ops {
            out = match op {
                Op::Token { token, value } => out.replace(token, value),
                Op::Replace { pattern, value } => {
                    pattern.replace_all(&out, NoExpand(value)).into_owned()
                }
            };
        }
        out
    }
}

fn token(token: &'static str, value: impl Into<String>) -> Op {
    Op::Token {
        token,
        value: value.into(),
    }
}

fn replace(pattern: &'static Lazy<Regex>, value: impl Into<String>) -> Op {
    Op::Replace {
        pattern,
        value: value.into(),
    }
}

/// Merge customer and audit data into a template.
///
/// Competitor chart entries are regenerated fresh on every call; use
/// [`merge_with_competitors`] when the entries must be fixed.
pub fn merge(template: &str, customer: &CustomerRecord, audit: &AuditResult) -> String {
    let competitors = competitor_samples(&customer.competitors);
    merge_with_competitors(template, customer, audit, &competitors)
}

/// Merge with an explicit competitor entry list instead of freshly
/// generated ones.
pub fn merge_with_competitors(
    template: &str,
    customer: &CustomerRecord,
    audit: &AuditResult,
    competitors: &[CompetitorSample],
) -> String {
    let mut out = template.to_string();
    for rule in rule_set(customer, audit, competitors) {
        out = rule.apply(out);
    }
    let leftover = crate::template::unresolved_tokens(&out);
    if !leftover.is_empty() {
        debug!(tokens = ?leftover, "tokens left unresolved after merge");
    }
    out
}

/// Build the ordered rule set for one report run. Later rules may rely on
/// earlier output, so the order here is part of the contract.
fn rule_set(
    customer: &CustomerRecord,
    audit: &AuditResult,
    competitors: &[CompetitorSample],
) -> Vec<MergeRule> {
    let domain = normalize_domain(&customer.website);
    let now = Utc::now();
    let long_date = now.format("%B %-d, %Y").to_string();
    let short_date = now.format("%m/%d/%Y").to_string();
    let overall = fmt_num(audit.overall_score);

    let mut rules = vec![
        MergeRule {
            name: "identity",
            ops: vec![
                replace(&EXAMPLE_COMPANY, &customer.company_name),
                replace(&EXAMPLE_DOMAIN, &domain),
                replace(
                    &TITLE_ELEMENT,
                    format!(
                        "<title>{} - SEO Audit Report</title>",
                        customer.company_name
                    ),
                ),
                token("[COMPANY_NAME]", &customer.company_name),
                token("[WEBSITE]", &domain),
            ],
        },
        MergeRule {
            name: "date_stamp",
            ops: vec![
                replace(&EXAMPLE_LONG_DATE, format!("Generated {long_date}")),
                replace(&EXAMPLE_SHORT_DATE, &short_date),
                token("[DATE]", &long_date),
            ],
        },
    ];

    if let Some(industry) = customer.industry.as_deref().filter(|s| !s.is_empty()) {
        rules.push(MergeRule {
            name: "industry",
            ops: vec![replace(&EXAMPLE_INDUSTRY, industry)],
        });
    }
    if let Some(location) = customer.location.as_deref().filter(|s| !s.is_empty()) {
        rules.push(MergeRule {
            name: "location",
            ops: vec![replace(&EXAMPLE_LOCATION, location)],
        });
    }

    rules.push(MergeRule {
        name: "overall_score",
        ops: vec![
            replace(&SCRIPT_OVERALL, format!("overallScore = {overall}")),
            replace(&RENDERED_OVERALL, format!(">{overall}<")),
            token("[OVERALL_SCORE]", &overall),
        ],
    });
    rules.push(MergeRule {
        name: "issue_counts",
        ops: vec![
            replace(&RENDERED_CRITICAL, labeled_kpi(audit.issues.critical, "Immediate action required")),
            replace(&RENDERED_MAJOR, labeled_kpi(audit.issues.major, "Should be addressed soon")),
            replace(&RENDERED_MINOR, labeled_kpi(audit.issues.minor, "Can be improved")),
            token("[CRITICAL_ISSUES]", audit.issues.critical.to_string()),
            token("[MAJOR_ISSUES]", audit.issues.major.to_string()),
            token("[MINOR_ISSUES]", audit.issues.minor.to_string()),
        ],
    });
    rules.push(MergeRule {
        name: "page_count",
        ops: vec![
            replace(&RENDERED_PAGES, labeled_kpi(audit.page_count, "Total pages crawled")),
            token("[PAGES_ANALYZED]", audit.page_count.to_string()),
        ],
    });

    let perf = &audit.performance;
    rules.push(MergeRule {
        name: "performance_scores",
        ops: vec![
            replace(&SCRIPT_DESKTOP, format!("desktopScore = {}", perf.desktop_score)),
            replace(&RENDERED_DESKTOP, labeled_score(perf.desktop_score, "Desktop Score")),
            replace(&SCRIPT_MOBILE, format!("mobileScore = {}", perf.mobile_score)),
            replace(&RENDERED_MOBILE, labeled_score(perf.mobile_score, "Mobile Score")),
            token("[DESKTOP_SCORE]", perf.desktop_score.to_string()),
            token("[MOBILE_SCORE]", perf.mobile_score.to_string()),
        ],
    });
    rules.push(MergeRule {
        name: "load_time",
        ops: vec![
            replace(&RENDERED_LOAD_TIME, format!(">{}s<", perf.load_time)),
            replace(&LABELED_LOAD_TIME, format!("Load Time: {}s", perf.load_time)),
            token("[LOAD_TIME]", &perf.load_time),
        ],
    });

    // Only false flags rewrite the example sentence; a true flag leaves
    // the template's example text in place (known fidelity gap, kept).
    let mut seo_ops = Vec::new();
    if !audit.seo.meta_tags {
        seo_ops.push(replace(
            &EXAMPLE_META_TEXT,
            "Meta descriptions missing on multiple pages",
        ));
    }
    if !audit.seo.schema_markup {
        seo_ops.push(replace(&EXAMPLE_SCHEMA_TEXT, "Schema markup not implemented"));
    }
    if !audit.seo.image_alt_tags {
        seo_ops.push(replace(&EXAMPLE_ALT_TEXT, "Multiple images missing alt tags"));
    }
    if !seo_ops.is_empty() {
        rules.push(MergeRule {
            name: "seo_findings",
            ops: seo_ops,
        });
    }

    rules.push(MergeRule {
        name: "performance_chart",
        ops: vec![replace(&PERFORMANCE_DATA_LITERAL, performance_chart_literal(perf))],
    });

    if !competitors.is_empty() {
        rules.push(MergeRule {
            name: "competitor_chart",
            ops: vec![replace(
                &COMPETITOR_DATA_LITERAL,
                competitor_chart_literal(competitors),
            )],
        });
    }

    rules
}

fn labeled_kpi(value: u32, label: &str) -> String {
    format!(">{value}</div>\n<p class=\"text-xs text-gray-500\">{label}")
}

fn labeled_score(value: u32, label: &str) -> String {
    format!(">{value}</div></div>\n<div class=\"text-xs text-gray-500\">{label}")
}

/// Rebuild the chart-series script literal from the audit's desktop
/// timings; mobile values are the desktop values scaled by the fixed
/// degradation factors.
fn performance_chart_literal(perf: &auditgen_core::PerformanceMetrics) -> String {
    format!(
        "const performanceData = {{\n            labels: ['LCP', 'FID', 'CLS', 'FCP', 'TTI', 'Speed Index'],\n            desktop: [{}, {}, {}, {}, 3.8, 3.1],\n            mobile: [{}, {}, {}, {}, 5.2, 4.5]\n        }}",
        fmt_num(perf.lcp),
        fmt_num(perf.fid),
        fmt_num(perf.cls),
        fmt_num(perf.fcp),
        fmt_num(perf.lcp * MOBILE_LCP_FACTOR),
        fmt_num(perf.fid * MOBILE_FID_FACTOR),
        fmt_num(perf.cls * MOBILE_CLS_FACTOR),
        fmt_num(perf.fcp * MOBILE_FCP_FACTOR),
    )
}

fn competitor_chart_literal(competitors: &[CompetitorSample]) -> String {
    let entries: Vec<serde_json::Value> = competitors
        .iter()
        .map(|c| {
            serde_json::json!({
                "name": c.name,
                "score": c.score,
                "traffic": c.traffic,
            })
        })
        .collect();
    format!(
        "const competitorData = {}",
        serde_json::Value::Array(entries)
    )
}

/// Script-literal number formatting: whole values print without a
/// fractional part (`83`, not `83.0`).
fn fmt_num(n: f64) -> String {
    format!("{n}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{unresolved_tokens, EMBEDDED_TEMPLATE};
    use auditgen_providers::audit::default_audit_result;

    fn customer(competitors: Vec<String>) -> CustomerRecord {
        CustomerRecord {
            id: "c1".to_string(),
            company_name: "Acme Co".to_string(),
            website: "https://acme.test/".to_string(),
            industry: None,
            location: None,
            competitors,
            audit_data: None,
        }
    }

    #[test]
    fn test_merge_fills_every_embedded_token() {
        let customer = customer(vec![]);
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);

        assert!(unresolved_tokens(&merged).is_empty());
        assert!(merged.contains("Acme Co"));
        assert!(merged.contains("acme.test"));
        assert!(merged.contains("<title>Acme Co - SEO Audit Report</title>"));
    }

    #[test]
    fn test_default_audit_markers_read_through() {
        let customer = customer(vec![]);
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);

        assert!(merged.contains("overallScore = 83"));
        assert!(merged.contains(">83<"));
        assert!(merged.contains("desktopScore = 77"));
        assert!(merged.contains("mobileScore = 56"));
        assert!(merged.contains(">1.8s<"));
        assert!(merged.contains(">6</div>"));
        assert!(merged.contains(">15</div>"));
    }

    #[test]
    fn test_date_stamp_uses_today() {
        let customer = customer(vec![]);
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);

        let long_date = Utc::now().format("%B %-d, %Y").to_string();
        assert!(merged.contains(&format!("Generated {long_date}")));
    }

    #[test]
    fn test_chart_mobile_values_are_scaled_desktop_values() {
        let customer = customer(vec![]);
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);

        let perf = &audit.performance;
        let expected = format!(
            "mobile: [{}, {}, {}, {}, 5.2, 4.5]",
            perf.lcp * 1.5,
            perf.fid * 1.2,
            perf.cls * 1.3,
            perf.fcp * 1.4,
        );
        assert!(merged.contains(&expected), "missing {expected}");
        let expected_desktop = format!(
            "desktop: [{}, {}, {}, {}, 3.8, 3.1]",
            perf.lcp, perf.fid, perf.cls, perf.fcp,
        );
        assert!(merged.contains(&expected_desktop));
    }

    #[test]
    fn test_seo_sentences_rewritten_only_for_false_flags() {
        let customer = customer(vec![]);
        // Default flags: meta_tags true, schema_markup and image_alt_tags false.
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);

        assert!(merged.contains("Meta descriptions missing on 5 pages"));
        assert!(merged.contains("Schema markup not implemented"));
        assert!(!merged.contains("No structured data found"));
        assert!(merged.contains("Multiple images missing alt tags"));
        assert!(!merged.contains("32 images missing alt tags"));
    }

    #[test]
    fn test_conditional_industry_and_location() {
        let mut with_fields = customer(vec![]);
        with_fields.industry = Some("Retail".to_string());
        with_fields.location = Some("Germany".to_string());
        let audit = default_audit_result(&with_fields.website);

        let merged = merge(EMBEDDED_TEMPLATE, &with_fields, &audit);
        assert!(merged.contains("Industry: Retail"));
        assert!(merged.contains("Market: Germany"));

        let without = merge(EMBEDDED_TEMPLATE, &customer(vec![]), &audit);
        assert!(without.contains("Manufacturing - Paint &amp; Coatings"));
        assert!(without.contains("South Africa"));
    }

    #[test]
    fn test_competitor_literal_holds_generated_entries() {
        let customer = customer(vec![
            "https://rival-one.test/".to_string(),
            "http://www.rival-two.test".to_string(),
        ]);
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);

        let literal = Regex::new(r"const competitorData = (\[[^\]]+\])")
            .unwrap()
            .captures(&merged)
            .expect("competitor literal present");
        let entries: Vec<serde_json::Value> = serde_json::from_str(&literal[1]).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["name"], "rival-one.test");
        assert_eq!(entries[1]["name"], "www.rival-two.test");
        for entry in &entries {
            let score = entry["score"].as_u64().unwrap();
            let traffic = entry["traffic"].as_u64().unwrap();
            assert!((65..=89).contains(&score));
            assert!((5000..=14999).contains(&traffic));
        }
    }

    #[test]
    fn test_competitor_literal_untouched_without_competitors() {
        let customer = customer(vec![]);
        let audit = default_audit_result(&customer.website);
        let merged = merge(EMBEDDED_TEMPLATE, &customer, &audit);
        assert!(merged.contains(r#"const competitorData = [{ name: "example-competitor.com""#));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let customer = customer(vec!["https://rival.test/".to_string()]);
        let audit = default_audit_result(&customer.website);
        let fixed = vec![CompetitorSample {
            name: "rival.test".to_string(),
            score: 70,
            traffic: 9000,
        }];

        let once = merge_with_competitors(EMBEDDED_TEMPLATE, &customer, &audit, &fixed);
        let twice = merge_with_competitors(&once, &customer, &audit, &fixed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_anchors_are_silent_noops() {
        let customer = customer(vec![]);
        let audit = default_audit_result(&customer.website);
        let plain = "<html><body>nothing to anchor on</body></html>";
        assert_eq!(merge(plain, &customer, &audit), plain);
    }

    #[test]
    fn test_customer_text_is_inserted_literally() {
        let mut tricky = customer(vec![]);
        tricky.company_name = "Acme $1 ${2} Co".to_string();
        let audit = default_audit_result(&tricky.website);
        let merged = merge(EMBEDDED_TEMPLATE, &tricky, &audit);
        assert!(merged.contains("Acme $1 ${2} Co"));
    }
}
