// Copyright 2025 Auditgen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Website/domain string normalization.

/// Strip the scheme and a single trailing slash from a website URL.
///
/// This is the one canonical rewrite applied everywhere a domain is
/// rendered or compared: `https://acme.test/` becomes `acme.test`.
/// Nothing else is touched; in particular a `www.` prefix is kept.
pub fn normalize_domain(website: &str) -> String {
    let stripped = website
        .strip_prefix("https://")
        .or_else(|| website.strip_prefix("http://"))
        .unwrap_or(website);
    stripped.strip_suffix('/').unwrap_or(stripped).to_string()
}
