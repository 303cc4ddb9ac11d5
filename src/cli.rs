use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "sentiscan",
    about = "Classify text sentiment and security threats, and fuse them into a severity assessment",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file [default: ./.sentiscan/config.toml, fallback ~/.config/sentiscan/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "terminal", value_name = "FORMAT")]
    pub format: ReportFormat,

    /// Override the primary-analyzer confidence threshold (0.0 - 1.0)
    #[arg(long, global = true, value_name = "VALUE")]
    pub threshold: Option<f64>,

    /// Never escalate to the LLM verifier
    #[arg(long, global = true)]
    pub offline: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print a one-line summary
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify the sentiment of TEXT (reads stdin when omitted)
    Sentiment { text: Option<String> },

    /// Scan TEXT for security-threat indicators (reads stdin when omitted)
    Scan { text: Option<String> },

    /// Assess a threat report: threat score fused with sentiment
    Report {
        /// Report text (reads stdin when omitted)
        text: Option<String>,

        /// Sentiment label to fuse with; analyzed from the report when omitted
        #[arg(long, value_name = "LABEL")]
        sentiment: Option<String>,
    },

    /// Show the emoji, colour and score used to display a sentiment label
    Display { label: String },

    /// Annotate every non-empty line of FILE as a comment and summarize
    Batch { file: PathBuf },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
