// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Template acquisition.
//!
//! Obtains the raw report template text through a four-tier fallback
//! chain: network fetch, an injected in-page fixture, an injected global
//! template string, and finally the compiled-in minimal template. Each
//! tier's failure is silent and complete — no partial template text is
//! ever returned — so [`TemplateLoader::load`] cannot fail and cannot
//! yield an empty document.

use auditgen_core::{Sourced, TemplateTier};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

/// The compiled-in fallback template: a complete, self-contained minimal
/// report document carrying both named insertion tokens and the
/// script-level example literals the structured merge rules target.
pub const EMBEDDED_TEMPLATE: &str = include_str!("embedded_report.html");

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([A-Z_]+)\]").unwrap());

/// List the insertion tokens still present in a template, in sorted order.
///
/// After a merge this reveals template drift: tokens the rule set did not
/// know how to fill.
pub fn unresolved_tokens(text: &str) -> Vec<String> {
    let tokens: BTreeSet<String> = TOKEN_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();
    tokens.into_iter().collect()
}

/// Loads template text, falling back tier by tier.
///
/// The fixture and global tiers are injected at construction rather than
/// probed from ambient state, so a loader's behavior is fixed once built.
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    client: reqwest::Client,
    fixture: Option<String>,
    global: Option<String>,
}

impl TemplateLoader {
    /// A loader with no fixture or global tier; fetch then embedded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject in-page fixture template text (tier 2).
    pub fn with_fixture(mut self, fixture: impl Into<String>) -> Self {
        self.fixture = Some(fixture.into());
        self
    }

    /// Inject global template text (tier 3).
    pub fn with_global(mut self, global: impl Into<String>) -> Self {
        self.global = Some(global.into());
        self
    }

    /// Load template text for `name_hint`, trying each tier in order.
    ///
    /// `name_hint` is the URL used by the fetch tier; anything that is not
    /// fetchable (bad URL, network error, non-success status) simply moves
    /// resolution to the next tier.
    pub async fn load(&self, name_hint: &str) -> Sourced<String, TemplateTier> {
        if let Some(text) = self.try_fetch(name_hint).await {
            return Sourced::new(text, TemplateTier::Fetched);
        }
        if let Some(fixture) = &self.fixture {
            debug!("template loaded from injected fixture");
            return Sourced::new(fixture.clone(), TemplateTier::Fixture);
        }
        if let Some(global) = &self.global {
            debug!("template loaded from injected global text");
            return Sourced::new(global.clone(), TemplateTier::Global);
        }
        debug!("template loaded from embedded fallback");
        Sourced::new(EMBEDDED_TEMPLATE.to_string(), TemplateTier::Embedded)
    }

    async fn try_fetch(&self, url: &str) -> Option<String> {
        if url.is_empty() {
            return None;
        }
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(text) => {
                    debug!(url, "template loaded via fetch");
                    Some(text)
                }
                Err(err) => {
                    debug!(url, error = %err, "template body unreadable, falling through");
                    None
                }
            },
            Ok(response) => {
                debug!(url, status = %response.status(), "template fetch not successful, falling through");
                None
            }
            Err(err) => {
                debug!(url, error = %err, "template fetch failed, falling through");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_tier_is_terminal_and_non_empty() {
        let loader = TemplateLoader::new();
        let loaded = loader.load("definitely not a url").await;
        assert_eq!(loaded.source, TemplateTier::Embedded);
        assert!(!loaded.value.is_empty());
        assert!(loaded.value.contains("[COMPANY_NAME]"));
    }

    #[tokio::test]
    async fn test_fixture_tier_beats_global_and_embedded() {
        let loader = TemplateLoader::new()
            .with_fixture("<html>fixture</html>")
            .with_global("<html>global</html>");
        let loaded = loader.load("not a url").await;
        assert_eq!(loaded.source, TemplateTier::Fixture);
        assert_eq!(loaded.value, "<html>fixture</html>");
    }

    #[tokio::test]
    async fn test_global_tier_when_no_fixture() {
        let loader = TemplateLoader::new().with_global("<html>global</html>");
        let loaded = loader.load("").await;
        assert_eq!(loaded.source, TemplateTier::Global);
        assert_eq!(loaded.value, "<html>global</html>");
    }

    #[test]
    fn test_embedded_template_carries_known_tokens() {
        let tokens = unresolved_tokens(EMBEDDED_TEMPLATE);
        for expected in [
            "COMPANY_NAME",
            "DATE",
            "WEBSITE",
            "OVERALL_SCORE",
            "CRITICAL_ISSUES",
            "MAJOR_ISSUES",
            "MINOR_ISSUES",
            "PAGES_ANALYZED",
            "DESKTOP_SCORE",
            "MOBILE_SCORE",
            "LOAD_TIME",
        ] {
            assert!(
                tokens.iter().any(|t| t == expected),
                "missing token {expected}"
            );
        }
    }

    #[test]
    fn test_unresolved_tokens_deduplicates() {
        let tokens = unresolved_tokens("[DATE] and again [DATE] plus [OTHER]");
        assert_eq!(tokens, vec!["DATE".to_string(), "OTHER".to_string()]);
    }
}
