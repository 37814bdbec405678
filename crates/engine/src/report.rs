// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Report generation orchestration.
//!
//! Ties the tiered pieces together for one customer: load a template,
//! resolve audit data, merge, and hand back the finished document with
//! full provenance. Every part degrades instead of failing, so the whole
//! pipeline is infallible by composition.

use crate::merge;
use crate::template::TemplateLoader;
use auditgen_core::{AuditResult, AuditSource, CustomerRecord, TemplateTier};
use auditgen_providers::audit::AuditDataResolver;
use tracing::info;

/// A finished report plus the provenance of everything that went into it.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// The merged document.
    pub html: String,
    /// The audit data the document was built from.
    pub audit: AuditResult,
    /// Which tier served the audit data.
    pub audit_source: AuditSource,
    /// Which tier served the template text.
    pub template_tier: TemplateTier,
}

/// Generates one report per call from an injected loader and resolver.
#[derive(Clone)]
pub struct ReportGenerator {
    loader: TemplateLoader,
    resolver: AuditDataResolver,
}

impl ReportGenerator {
    /// Build a generator from its two collaborators.
    pub fn new(loader: TemplateLoader, resolver: AuditDataResolver) -> Self {
        Self { loader, resolver }
    }

    /// Generate a report for `customer`, fetching the template from
    /// `template_hint` when possible.
    pub async fn generate(
        &self,
        customer: &CustomerRecord,
        template_hint: &str,
    ) -> GeneratedReport {
        let template = self.loader.load(template_hint).await;
        let audit = self.resolver.resolve(customer);
        let html = merge::merge(&template.value, customer, &audit.value);
        info!(
            customer = %customer.id,
            template_tier = %template.source,
            audit_source = %audit.source,
            "report generated"
        );
        GeneratedReport {
            html,
            audit: audit.value,
            audit_source: audit.source,
            template_tier: template.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditgen_providers::store::MemoryStore;
    use std::sync::Arc;

    fn generator() -> ReportGenerator {
        ReportGenerator::new(
            TemplateLoader::new(),
            AuditDataResolver::new(Arc::new(MemoryStore::new())),
        )
    }

    #[tokio::test]
    async fn test_generate_degrades_to_defaults_end_to_end() {
        let customer = CustomerRecord {
            id: "c1".to_string(),
            company_name: "Acme Co".to_string(),
            website: "https://acme.test/".to_string(),
            industry: None,
            location: None,
            competitors: vec![],
            audit_data: None,
        };

        let report = generator().generate(&customer, "not a fetchable url").await;
        assert_eq!(report.template_tier, TemplateTier::Embedded);
        assert_eq!(report.audit_source, AuditSource::Default);
        assert_eq!(report.audit.overall_score, 83.0);
        assert!(report.html.contains("Acme Co"));
        assert!(report.html.contains(">83<"));
        assert!(report.html.contains(">6</div>"));
    }

    #[tokio::test]
    async fn test_generate_prefers_embedded_audit_data() {
        let mut customer = CustomerRecord {
            id: "c1".to_string(),
            company_name: "Acme Co".to_string(),
            website: "https://acme.test/".to_string(),
            industry: None,
            location: None,
            competitors: vec![],
            audit_data: None,
        };
        let mut embedded = auditgen_providers::audit::default_audit_result(&customer.website);
        embedded.overall_score = 61.5;
        customer.audit_data = Some(embedded);

        let report = generator().generate(&customer, "").await;
        assert_eq!(report.audit_source, AuditSource::Embedded);
        assert!(report.html.contains(">61.5<"));
    }
}
