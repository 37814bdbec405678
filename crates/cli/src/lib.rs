//! CLI for Auditgen.
//!
//! This crate provides the command-line interface for Auditgen: the
//! `generate` subcommand builds the service graph and writes one merged
//! report, and the `synthetic` subcommand resolves a single metric
//! category through the tiered resolver for inspection.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::Context;
use auditgen_core::CustomerRecord;
use auditgen_engine::{ReportGenerator, TemplateLoader};
use auditgen_providers::audit::AuditDataResolver;
use auditgen_providers::store::MemoryStore;
use auditgen_providers::synthetic::SyntheticMetricsProvider;
use auditgen_providers::tiered::TieredResolver;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Auditgen CLI.
#[derive(Parser, Debug)]
#[command(name = "auditgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one merged audit report for a customer.
    ///
    /// Reads the customer record from a JSON file, resolves audit data
    /// (embedded, then a store snapshot, then the fixed default), loads
    /// the template (fetch, then a local file, then the embedded
    /// fallback), merges and writes the HTML document.
    Generate {
        /// Path to the customer record JSON file.
        #[arg(short, long)]
        customer: PathBuf,

        /// Template URL for the fetch tier.
        #[arg(short, long, default_value = "")]
        template: String,

        /// Local template file, used when the fetch tier fails.
        #[arg(long)]
        template_file: Option<PathBuf>,

        /// Key-value store snapshot (JSON object of string keys to string
        /// values) to scan for persisted audit records.
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Output path; defaults to `<customer-id>-audit-report.html`.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Resolve one synthetic metric payload and print it as JSON.
    Synthetic {
        /// Metric category to resolve.
        #[arg(short, long, value_enum)]
        category: Category,

        /// Target URL or domain.
        #[arg(short, long)]
        target: String,
    },
}

/// Metric categories the synthetic provider knows how to produce.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Category {
    /// Lighthouse category scores for a page.
    Lighthouse,
    /// Backlink profile counts for a domain.
    Backlinks,
    /// Keyword ranking samples for a domain.
    Keywords,
    /// Competing-domain metrics.
    Competitors,
    /// On-page technical SEO metrics.
    Technical,
}

/// Run the CLI with the given arguments.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            customer,
            template,
            template_file,
            store,
            out,
        } => generate(customer, template, template_file, store, out).await,
        Commands::Synthetic { category, target } => synthetic(category, &target).await,
    }
}

async fn generate(
    customer_path: PathBuf,
    template: String,
    template_file: Option<PathBuf>,
    store_path: Option<PathBuf>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&customer_path)
        .with_context(|| format!("reading customer file {}", customer_path.display()))?;
    let customer: CustomerRecord = serde_json::from_str(&raw)
        .with_context(|| format!("parsing customer record {}", customer_path.display()))?;

    let store = match store_path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading store snapshot {}", path.display()))?;
            let entries: HashMap<String, String> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing store snapshot {}", path.display()))?;
            MemoryStore::from_entries(entries)
        }
        None => MemoryStore::new(),
    };

    let mut loader = TemplateLoader::new();
    if let Some(path) = template_file {
        let fixture = std::fs::read_to_string(&path)
            .with_context(|| format!("reading template file {}", path.display()))?;
        loader = loader.with_fixture(fixture);
    }

    let generator = ReportGenerator::new(loader, AuditDataResolver::new(Arc::new(store)));
    let report = generator.generate(&customer, &template).await;

    let out = out.unwrap_or_else(|| PathBuf::from(format!("{}-audit-report.html", customer.id)));
    std::fs::write(&out, &report.html)
        .with_context(|| format!("writing report to {}", out.display()))?;

    info!(
        out = %out.display(),
        template_tier = %report.template_tier,
        audit_source = %report.audit_source,
        "report written"
    );
    println!("Report written to {}", out.display());
    Ok(())
}

async fn synthetic(category: Category, target: &str) -> anyhow::Result<()> {
    let resolver = TieredResolver::synthetic_only(SyntheticMetricsProvider::default());
    let json = match category {
        Category::Lighthouse => serde_json::to_string_pretty(&resolver.lighthouse(target).await)?,
        Category::Backlinks => serde_json::to_string_pretty(&resolver.backlinks(target).await)?,
        Category::Keywords => serde_json::to_string_pretty(&resolver.keywords(target).await)?,
        Category::Competitors => serde_json::to_string_pretty(&resolver.competitors(target).await)?,
        Category::Technical => serde_json::to_string_pretty(&resolver.technical(target).await)?,
    };
    println!("{json}");
    Ok(())
}
