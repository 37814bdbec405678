// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Audit-results resolution for a customer record.
//!
//! Three tiers, in priority order: data embedded on the record, a matching
//! entry in the persisted key-value store, and the fixed default result.
//! Every tier failure degrades to the next one; resolution never fails.

use crate::store::KeyValueStore;
use auditgen_core::{
    normalize_domain, AuditResult, AuditSource, CustomerRecord, IssueCounts, PerformanceMetrics,
    SeoFlags, Sourced,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};

/// Marker substring a store key must contain (together with the customer
/// id) to be considered an audit record.
///
/// The match is substring-based on both parts, so unrelated records whose
/// keys share these substrings can false-positive. The persisted key format
/// is not ours to tighten; see the project design notes.
pub const AUDIT_KEY_MARKER: &str = "audit";

/// Resolves an [`AuditResult`] for a customer from the highest-priority
/// source available.
#[derive(Clone)]
pub struct AuditDataResolver {
    store: Arc<dyn KeyValueStore>,
}

impl AuditDataResolver {
    /// Create a resolver over the given store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Resolve audit data for `customer`. Always returns a well-formed
    /// result.
    ///
    /// Store keys are visited in the store's own enumeration order; when
    /// several entries match the same customer, which one wins is
    /// store-defined.
    pub fn resolve(&self, customer: &CustomerRecord) -> Sourced<AuditResult, AuditSource> {
        if let Some(audit) = &customer.audit_data {
            debug!(customer = %customer.id, "using audit data embedded on the customer record");
            return Sourced::new(audit.clone(), AuditSource::Embedded);
        }

        for key in self.store.keys() {
            if !(key.contains(AUDIT_KEY_MARKER) && key.contains(&customer.id)) {
                continue;
            }
            let Some(raw) = self.store.get(&key) else {
                continue;
            };
            match parse_stored_audit(&raw) {
                Some(audit) => {
                    debug!(customer = %customer.id, key = %key, "using persisted audit record");
                    return Sourced::new(audit, AuditSource::Stored);
                }
                None => {
                    warn!(customer = %customer.id, key = %key, "skipping malformed audit record");
                }
            }
        }

        debug!(customer = %customer.id, "no audit data found, using default result");
        Sourced::new(default_audit_result(&customer.website), AuditSource::Default)
    }
}

/// Parse one stored entry. A valid entry is JSON with either a top-level
/// `overallScore` field or a nested `results` object holding the actual
/// audit; anything else is treated as malformed and skipped.
///
/// A nested `results` object is preferred, but a `results` key that is
/// null or does not hold the audit shape counts as absent and the
/// top-level object gets its turn before the entry is given up on.
fn parse_stored_audit(raw: &str) -> Option<AuditResult> {
    let parsed: serde_json::Value = serde_json::from_str(raw).ok()?;
    if let Some(results) = parsed.get("results").filter(|r| r.is_object()) {
        if let Ok(audit) = serde_json::from_value(results.clone()) {
            return Some(audit);
        }
    }
    if parsed.get("overallScore").is_some() {
        return serde_json::from_value(parsed).ok();
    }
    None
}

/// The fixed default audit result, used when no real data exists anywhere.
///
/// Values are deterministic on purpose: a report generated with no data at
/// all should look the same every time, carrying only the customer's
/// website, its normalized domain and a fresh timestamp.
pub fn default_audit_result(website: &str) -> AuditResult {
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
        website: website.to_string(),
        domain: normalize_domain(website),
        audit_date: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn customer() -> CustomerRecord {
        CustomerRecord {
            id: "c1".to_string(),
            company_name: "Acme Co".to_string(),
            website: "https://acme.test/".to_string(),
            industry: None,
            location: None,
            competitors: vec![],
            audit_data: None,
        }
    }

    fn stored_json(score: f64) -> String {
        serde_json::to_string(&default_audit_result("https://stored.test/"))
            .unwrap()
            .replace("83.0", &score.to_string())
    }

    #[test]
    fn test_embedded_audit_data_wins_verbatim() {
        let mut store = MemoryStore::new();
        store.insert("audit_results_c1", stored_json(50.0));

        let mut customer = customer();
        let embedded = default_audit_result("https://embedded.test/");
        customer.audit_data = Some(embedded.clone());

        let resolved = AuditDataResolver::new(Arc::new(store)).resolve(&customer);
        assert_eq!(resolved.source, AuditSource::Embedded);
        assert_eq!(resolved.value, embedded);
    }

    #[test]
    fn test_stored_record_found_by_marker_and_id() {
        let mut store = MemoryStore::new();
        store.insert("customer_audit_data_c1", stored_json(61.5));
        store.insert("audit_results_other", stored_json(10.0));
        store.insert("unrelated_key", "not even json");

        let resolved = AuditDataResolver::new(Arc::new(store)).resolve(&customer());
        assert_eq!(resolved.source, AuditSource::Stored);
        assert_eq!(resolved.value.overall_score, 61.5);
    }

    #[test]
    fn test_nested_results_object_is_unwrapped() {
        let wrapped = format!(
            r#"{{"customer":{{"id":"c1"}},"results":{}}}"#,
            stored_json(72.4)
        );
        let mut store = MemoryStore::new();
        store.insert("audit_c1", wrapped);

        let resolved = AuditDataResolver::new(Arc::new(store)).resolve(&customer());
        assert_eq!(resolved.source, AuditSource::Stored);
        assert_eq!(resolved.value.overall_score, 72.4);
    }

    #[test]
    fn test_null_results_key_falls_back_to_top_level_shape() {
        let flat = stored_json(58.0);
        let with_null = flat.replacen('{', r#"{"results":null,"#, 1);
        let mut store = MemoryStore::new();
        store.insert("audit_c1", with_null);

        let resolved = AuditDataResolver::new(Arc::new(store)).resolve(&customer());
        assert_eq!(resolved.source, AuditSource::Stored);
        assert_eq!(resolved.value.overall_score, 58.0);
    }

    #[test]
    fn test_malformed_entries_never_abort_the_scan() {
        let mut store = MemoryStore::new();
        store.insert("audit_c1_broken_a", "{{{ definitely not json");
        store.insert("audit_c1_broken_b", r#"{"overallScore":"not a shape"}"#);
        store.insert("audit_c1_good", stored_json(77.0));
        store.insert("audit_c1_broken_c", r#"{"noScoreHere":true}"#);

        let resolved = AuditDataResolver::new(Arc::new(store)).resolve(&customer());
        assert_eq!(resolved.source, AuditSource::Stored);
        assert_eq!(resolved.value.overall_score, 77.0);
    }

    #[test]
    fn test_default_result_when_nothing_matches() {
        let resolved = AuditDataResolver::new(Arc::new(MemoryStore::new())).resolve(&customer());
        assert_eq!(resolved.source, AuditSource::Default);

        let audit = resolved.value;
        assert_eq!(audit.overall_score, 83.0);
        assert_eq!(audit.issues.critical, 6);
        assert_eq!(audit.issues.major, 8);
        assert_eq!(audit.issues.minor, 23);
        assert_eq!(audit.page_count, 15);
        assert_eq!(audit.performance.desktop_score, 77);
        assert_eq!(audit.performance.mobile_score, 56);
        assert_eq!(audit.performance.load_time, "1.8");
        assert_eq!(audit.website, "https://acme.test/");
        assert_eq!(audit.domain, "acme.test");
    }
}
