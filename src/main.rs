//! `aegis-agent`: run SEO audits for registered sites and manage them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use aegis_agent::config::AgentConfig;
use aegis_agent::domain::models::{AnalysisResult, Category, ConnectMethod, Run, Site};
use aegis_agent::lifecycle::{self, AppState};
use aegis_agent::service::{BatchOutcome, NewSite, SiteSummary, DEFAULT_RUN_LIMIT};

#[derive(Parser)]
#[command(name = "aegis-agent")]
#[command(about = "AegisIndex SEO audit agent")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a single site
    RunSite { domain: String },

    /// Analyze every verified site
    RunAll,

    /// Register a site and print verification instructions
    AddSite {
        domain: String,
        #[arg(long, default_value = "manual")]
        connect_method: ConnectMethod,
    },

    /// Mark a site as verified
    VerifySite { domain: String },

    /// Show latest scores and the last run
    Summary { domain: String },

    /// List recent runs, newest first
    Runs {
        domain: String,
        #[arg(long, default_value_t = DEFAULT_RUN_LIMIT)]
        limit: i64,
    },
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    lifecycle::init_logging();

    let config = AgentConfig::from_env()?;
    let state = lifecycle::setup(&config)
        .await
        .context("Failed to initialize database")?;

    let outcome = dispatch(&state, cli.command, cli.json).await;
    lifecycle::shutdown(state).await;
    outcome
}

async fn dispatch(state: &AppState, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::RunSite { domain } => {
            let result = state.runner.run_for_site(&domain).await?;
            emit(json, &result, || print_analysis(&domain, &result))
        }
        Commands::RunAll => {
            let outcomes = state.runner.run_for_all_sites().await?;
            let report: Vec<BatchReport> = outcomes.iter().map(BatchReport::from).collect();
            emit(json, &report, || print_batch(&outcomes))
        }
        Commands::AddSite {
            domain,
            connect_method,
        } => {
            let created = state.sites.add_site(&domain, connect_method).await?;
            emit(json, &created, || print_new_site(&created))
        }
        Commands::VerifySite { domain } => {
            let site = state.sites.verify_site(&domain).await?;
            emit(json, &site, || println!("Site {} verified", site.domain))
        }
        Commands::Summary { domain } => {
            let summary = state.sites.summary(&domain).await?;
            emit(json, &summary, || print_summary(&summary))
        }
        Commands::Runs { domain, limit } => {
            let runs = state.sites.runs(&domain, limit).await?;
            emit(json, &runs, || print_runs(&runs))
        }
    }
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

// ============================================================================
// JSON Response Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchReport<'a> {
    domain: &'a str,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a BatchOutcome> for BatchReport<'a> {
    fn from(outcome: &'a BatchOutcome) -> Self {
        Self {
            domain: &outcome.domain,
            success: outcome.is_success(),
            result: outcome.result.as_ref().ok(),
            error: outcome.result.as_ref().err().map(|e| e.to_string()),
        }
    }
}

// ============================================================================
// Text output
// ============================================================================

fn print_analysis(domain: &str, result: &AnalysisResult) {
    println!("Audit complete for {domain}");
    println!("  {}", result.headline());
    for category in Category::ALL {
        println!(
            "    {:<16} {:>3}/100  {}",
            category.label(),
            result.analysis.score(category),
            category.description()
        );
    }
    println!("  Critical issues: {}", result.issues.critical.len());
    println!("  Warnings: {}", result.issues.warnings.len());
    println!("  Recommendations: {}", result.recommendations.len());
    println!(
        "  Trend: {} ({:+} points)",
        result.trends.seo_trend, result.trends.improvement
    );
    println!("  {}", result.issues.summary);
    for rec in &result.recommendations {
        println!(
            "  - [{}] {} ({}): {}",
            rec.priority.as_str(),
            rec.title,
            rec.category.label(),
            rec.patch.content
        );
    }
}

fn print_batch(outcomes: &[BatchOutcome]) {
    if outcomes.is_empty() {
        println!("No verified sites found");
        return;
    }
    for outcome in outcomes {
        match &outcome.result {
            Ok(result) => println!("{}: {}", outcome.domain, result.headline()),
            Err(e) => println!("{}: Failed: {}", outcome.domain, e),
        }
    }
}

fn print_new_site(created: &NewSite) {
    let v = &created.verification;
    println!("Site {} added ({})", created.site.domain, created.site.connect_method.as_str());
    println!("Verify ownership with either:");
    println!("  DNS TXT record: {}", v.dns_txt_record);
    println!("  File {} containing: {}", v.file_path, v.file_content);
}

fn print_site(site: &Site) {
    println!(
        "{} ({}, {})",
        site.domain,
        site.connect_method.as_str(),
        if site.verified { "verified" } else { "unverified" }
    );
    match (site.last_score_seo, site.last_score_index, site.last_audit_at) {
        (Some(seo), Some(index), Some(at)) => {
            println!("  Last audit {}: SEO {}/100, Indexability {}/100", at.to_rfc3339(), seo, index)
        }
        _ => println!("  Not audited yet"),
    }
}

fn print_run(run: &Run) {
    let summary = if run.status.is_terminal() {
        run.summary.as_deref().unwrap_or("-")
    } else {
        "in progress"
    };
    println!("  {} {:<9} {}", run.started_at.to_rfc3339(), run.status.as_str(), summary);
}

fn print_summary(summary: &SiteSummary) {
    print_site(&summary.site);
    match &summary.last_run {
        Some(run) => {
            println!("Last run:");
            print_run(run);
        }
        None => println!("No runs yet"),
    }
}

fn print_runs(runs: &[Run]) {
    if runs.is_empty() {
        println!("No runs yet");
    }
    for run in runs {
        print_run(run);
    }
}
