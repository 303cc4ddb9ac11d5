//! `sentiscan` — classify text sentiment and security threats, and fuse them
//! into a severity assessment.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load and validate config ([`config::load_config`]); CLI flags override it.
//! 3. Build the threat matcher ([`threat::patterns`]) and, when needed, the
//!    hybrid sentiment analyzer ([`sentiment::hybrid`]).
//! 4. Run the requested analysis and render it ([`report`]).
//! 5. Exit `0`, or `2` when `scan`/`report` finds a critical risk.

mod cli;
mod config;
mod display;
mod distribution;
mod models;
mod report;
mod sentiment;
mod threat;

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Result};
use clap::Parser;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, ReportFormat};
use config::{load_config, Config};
use distribution::{annotate_comment, SentimentDistribution};
use models::{AnnotatedComment, RiskLevel};
use report::{assess_with_sentiment, BatchView, ReportView};
use sentiment::hybrid::HybridSentimentAnalyzer;
use threat::patterns::ThreatMatcher;

/// Exit status for a critical finding.
const EXIT_CRITICAL: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(threshold) = cli.threshold {
        config.sentiment.confidence_threshold = threshold;
    }
    if cli.offline {
        config.verifier.enabled = false;
    }
    config.verifier.fill_credential_from_env();
    config.validate()?;

    let json = matches!(cli.format, ReportFormat::Json);

    match cli.command {
        Command::Sentiment { text } => {
            let text = read_input(text)?;
            let outcome = hybrid_analyzer(&config)?.analyze_sentiment(&text).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                report::terminal::render_sentiment(&outcome, cli.quiet);
            }
        }
        Command::Scan { text } => {
            let text = read_input(text)?;
            let finding = ThreatMatcher::new()?.analyze_security_content(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&finding)?);
            } else {
                report::terminal::render_finding(&finding, cli.quiet);
            }
            exit_on_critical(finding.risk_level);
        }
        Command::Report { text, sentiment } => {
            let text = read_input(text)?;
            let matcher = ThreatMatcher::new()?;

            let view = match sentiment {
                Some(label) => ReportView::with_label(&matcher, &text, &label),
                None => assess_with_sentiment(&hybrid_analyzer(&config)?, &matcher, &text).await,
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                report::terminal::render_report(&view, cli.quiet);
            }
            exit_on_critical(view.assessment.risk_level);
        }
        Command::Display { label } => {
            let annotation = display::map_sentiment_to_display(&label);
            if json {
                println!("{}", serde_json::to_string_pretty(&annotation)?);
            } else {
                report::terminal::render_display(&label, &annotation);
            }
        }
        Command::Batch { file } => {
            let analyzer = hybrid_analyzer(&config)?;
            let comments = annotate_file(&analyzer, &file, cli.quiet || json).await?;
            let distribution = SentimentDistribution::from_comments(&comments);
            if json {
                let view = BatchView {
                    comments: &comments,
                    distribution: &distribution,
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                report::terminal::render_batch(&comments, &distribution, cli.quiet);
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` overrides the level.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "sentiscan=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn hybrid_analyzer(config: &Config) -> Result<HybridSentimentAnalyzer> {
    HybridSentimentAnalyzer::from_config(&config.sentiment, &config.verifier)
}

/// The positional text, or all of stdin when it was omitted.
fn read_input(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn exit_on_critical(level: RiskLevel) {
    if level == RiskLevel::Critical {
        std::process::exit(EXIT_CRITICAL);
    }
}

/// Analyze each non-empty line of `path` as one comment.
///
/// Lines are processed concurrently in fixed-size chunks; results keep the
/// file's order.
async fn annotate_file(
    analyzer: &HybridSentimentAnalyzer,
    path: &Path,
    quiet: bool,
) -> Result<Vec<AnnotatedComment>> {
    const BATCH_SIZE: usize = 16;

    let content = std::fs::read_to_string(path)?;
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        bail!("no comments found in {}", path.display());
    }

    let pb = if !quiet {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut comments = Vec::with_capacity(lines.len());

    for chunk in lines.chunks(BATCH_SIZE) {
        let outcomes = join_all(chunk.iter().map(|line| analyzer.analyze_sentiment(line))).await;

        for (line, outcome) in chunk.iter().zip(outcomes) {
            comments.push(annotate_comment(line, &outcome));
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(comments)
}
