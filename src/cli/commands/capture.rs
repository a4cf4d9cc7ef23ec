//! Capture command - record ideas, issues, and decisions.
//!
//! Allocates the next available ID for the record family, renders the
//! markdown block, and splices it into the backing file under an
//! exclusive lock. The text argument doubles as the description (ideas,
//! issues) or the decision statement when no explicit one is given.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::analyzer::Analyzer;
use crate::capture::{derive_title, Capture, AUTO_SOURCE};
use crate::store::{DecisionFields, IdeaFields, IssueFields};

/// Arguments for the capture command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog capture idea \"Automate the nightly backup\" --title \"Backup automation\"\n    \
    govlog capture issue \"Deploy script fails on retry\" --severity HIGH\n    \
    govlog capture decision \"Use sidecar lock files\" --context \"Atomic replace races\"\n    \
    govlog capture idea \"Project-local note\" --project .")]
pub struct Args {
    #[command(subcommand)]
    pub record: Record,
}

/// Record families that can be captured.
#[derive(clap::Subcommand)]
pub enum Record {
    /// Capture an idea into the ideas backlog
    Idea(IdeaArgs),
    /// Capture an issue into the issues tracker
    Issue(IssueArgs),
    /// Capture a decision into the decisions log
    Decision(DecisionArgs),
}

#[derive(clap::Args)]
pub struct IdeaArgs {
    /// The idea text; used as the description unless --description is given
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Short title; derived from the text when omitted
    #[arg(long)]
    pub title: Option<String>,

    /// Category, e.g. Automation or Architecture
    #[arg(long, default_value = "Process")]
    pub category: String,

    /// Priority: HIGH, MEDIUM, or LOW
    #[arg(long, default_value = "MEDIUM")]
    pub priority: String,

    /// Full description, overriding the text argument
    #[arg(long)]
    pub description: Option<String>,

    /// Why the idea is needed
    #[arg(long)]
    pub why_needed: Option<String>,

    /// Blocking item
    #[arg(long, default_value = "None")]
    pub blocker: String,

    /// Effort estimate: LOW, MEDIUM, or HIGH
    #[arg(long, default_value = "MEDIUM")]
    pub effort: String,

    /// Related record ID; repeat for multiple
    #[arg(long)]
    pub related: Vec<String>,

    /// Validation checklist entry; repeat for multiple
    #[arg(long)]
    pub validation: Vec<String>,

    /// Capture source annotation
    #[arg(long)]
    pub source: Option<String>,

    /// Use the project-local files under this root instead of the global ones
    #[arg(long, value_name = "ROOT")]
    pub project: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct IssueArgs {
    /// The issue text; used as the description unless --description is given
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Short title; derived from the text when omitted
    #[arg(long)]
    pub title: Option<String>,

    /// Severity: CRITICAL, HIGH, MEDIUM, or LOW
    #[arg(long, default_value = "MEDIUM")]
    pub severity: String,

    /// Category, e.g. Bug or Gap
    #[arg(long, default_value = "Bug")]
    pub category: String,

    /// Full description, overriding the text argument
    #[arg(long)]
    pub description: Option<String>,

    /// What fails if the issue is not fixed
    #[arg(long)]
    pub impact: Option<String>,

    /// Resolution step; repeat for multiple
    #[arg(long)]
    pub resolution: Vec<String>,

    /// Related record ID; repeat for multiple
    #[arg(long)]
    pub related: Vec<String>,

    /// Capture source annotation
    #[arg(long)]
    pub source: Option<String>,

    /// Use the project-local files under this root instead of the global ones
    #[arg(long, value_name = "ROOT")]
    pub project: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct DecisionArgs {
    /// The decision text; used as the decision statement unless --decision is given
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Short title; derived from the text when omitted
    #[arg(long)]
    pub title: Option<String>,

    /// Status: Accepted, Superseded, or Revisit
    #[arg(long, default_value = "Accepted")]
    pub status: String,

    /// The situation that forced a choice
    #[arg(long)]
    pub context: Option<String>,

    /// What was decided, overriding the text argument
    #[arg(long)]
    pub decision: Option<String>,

    /// What follows from the choice
    #[arg(long)]
    pub consequences: Option<String>,

    /// Related record ID; repeat for multiple
    #[arg(long)]
    pub related: Vec<String>,

    /// Capture source annotation
    #[arg(long)]
    pub source: Option<String>,

    /// Use the project-local files under this root instead of the global ones
    #[arg(long, value_name = "ROOT")]
    pub project: Option<PathBuf>,
}

/// Executes the capture command.
pub fn run(args: Args) -> Result<()> {
    match args.record {
        Record::Idea(args) => capture_idea(args),
        Record::Issue(args) => capture_issue(args),
        Record::Decision(args) => capture_decision(args),
    }
}

fn capture_idea(args: IdeaArgs) -> Result<()> {
    let capture = orchestrator(args.project)?;
    let fields = IdeaFields {
        title: args.title.unwrap_or_else(|| derive_title(&args.text)),
        category: args.category,
        priority: args.priority,
        description: args.description.unwrap_or_default(),
        why_needed: args.why_needed.unwrap_or_default(),
        blocker: args.blocker,
        effort: args.effort,
        related: args.related,
        validation: args.validation,
        source: args.source.unwrap_or_else(|| AUTO_SOURCE.to_string()),
    };

    let id = capture.capture_idea(&args.text, fields)?;
    announce("idea", &id, capture.store().paths().ideas.display());
    Ok(())
}

fn capture_issue(args: IssueArgs) -> Result<()> {
    let capture = orchestrator(args.project)?;
    let fields = IssueFields {
        title: args.title.unwrap_or_else(|| derive_title(&args.text)),
        severity: args.severity,
        category: args.category,
        description: args.description.unwrap_or_default(),
        impact: args.impact.unwrap_or_default(),
        resolution: args.resolution,
        related: args.related,
        source: args.source.unwrap_or_else(|| AUTO_SOURCE.to_string()),
    };

    let id = capture.capture_issue(&args.text, fields)?;
    announce("issue", &id, capture.store().paths().issues.display());
    Ok(())
}

fn capture_decision(args: DecisionArgs) -> Result<()> {
    let capture = orchestrator(args.project)?;
    let fields = DecisionFields {
        title: args.title.unwrap_or_else(|| derive_title(&args.text)),
        status: args.status,
        context: args.context.unwrap_or_default(),
        decision: args.decision.unwrap_or_default(),
        consequences: args.consequences.unwrap_or_default(),
        related: args.related,
        source: args.source.unwrap_or_else(|| AUTO_SOURCE.to_string()),
    };

    let id = capture.capture_decision(&args.text, fields)?;
    announce("decision", &id, capture.store().paths().decisions.display());
    Ok(())
}

fn orchestrator(project: Option<PathBuf>) -> Result<Capture> {
    let (store, config) = super::open_store(project)?;
    Ok(Capture::new(Analyzer::with_threshold(config.threshold()), store))
}

fn announce(kind: &str, id: &str, path: impl std::fmt::Display) {
    println!("{} Captured {} {}", "✓".green(), kind, id.cyan().bold());
    println!("  {}  {}", "File:".dimmed(), path);
}
