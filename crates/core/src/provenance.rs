// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Source tagging for tiered resolution.
//!
//! Every tiered resolver in this workspace degrades silently: a failed
//! tier falls through to the next one and the caller always receives a
//! value. The tag carried by [`Sourced`] is what lets callers and tests
//! still tell real data from synthetic data after the fact.

use serde::{Deserialize, Serialize};

/// A resolved value together with the tier that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sourced<T, S> {
    /// The resolved payload.
    pub value: T,
    /// Which tier served this value.
    pub source: S,
}

impl<T, S> Sourced<T, S> {
    /// Tag a value with its source.
    pub fn new(value: T, source: S) -> Self {
        Self { value, source }
    }

    /// Map the payload while keeping the source tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U, S> {
        Sourced {
            value: f(self.value),
            source: self.source,
        }
    }

    /// Discard the tag and take the payload.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Which tier served a metric-category payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSource {
    /// The live metrics service answered.
    Live,
    /// The synthetic provider answered (live disabled, absent, or failed).
    Synthetic,
}

/// Which tier served an audit-results object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSource {
    /// Data embedded on the customer record, returned verbatim.
    Embedded,
    /// A matching record found in the persisted key-value store.
    Stored,
    /// The fixed default audit result.
    Default,
}

/// Which tier served the template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateTier {
    /// Network fetch succeeded.
    Fetched,
    /// The injected in-page fixture was used.
    Fixture,
    /// The injected global template text was used.
    Global,
    /// The compiled-in fallback template was used.
    Embedded,
}

impl std::fmt::Display for MetricsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsSource::Live => write!(f, "live"),
            MetricsSource::Synthetic => write!(f, "synthetic"),
        }
    }
}

impl std::fmt::Display for AuditSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditSource::Embedded => write!(f, "embedded"),
            AuditSource::Stored => write!(f, "stored"),
            AuditSource::Default => write!(f, "default"),
        }
    }
}

impl std::fmt::Display for TemplateTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateTier::Fetched => write!(f, "fetched"),
            TemplateTier::Fixture => write!(f, "fixture"),
            TemplateTier::Global => write!(f, "global"),
            TemplateTier::Embedded => write!(f, "embedded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sourced_map_keeps_tag() {
        let sourced = Sourced::new(41, MetricsSource::Synthetic);
        let mapped = sourced.map(|n| n + 1);
        assert_eq!(mapped.value, 42);
        assert_eq!(mapped.source, MetricsSource::Synthetic);
    }

    #[test]
    fn test_source_tags_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&AuditSource::Default).unwrap(),
            "\"default\""
        );
        assert_eq!(
            serde_json::to_string(&TemplateTier::Fetched).unwrap(),
            "\"fetched\""
        );
    }
}
