//! Analyze command - classify text into governance items.
//!
//! Runs the signal-based classifier over text from the argument or stdin
//! and prints what it found, without writing anything to the backing
//! files. The presentation view adds suggested categories, priorities,
//! and a short explanation per item; the summary view is terser.

use std::io::Read;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analyzer::Analyzer;
use crate::capture::{Capture, PresentationReport};
use crate::cli::format::OutputFormat;

/// Arguments for the analyze command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    govlog analyze \"The deployment script is broken and keeps failing\"\n    \
    govlog analyze --present \"We should automate the backup process\"\n    \
    cat notes.txt | govlog analyze --format json")]
pub struct Args {
    /// Text to analyze; reads stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Output format: text (default) or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Show the full presentation with titles, suggestions, and explanations
    #[arg(short, long)]
    pub present: bool,

    /// Minimum sentence score for detection (overrides config)
    #[arg(short, long)]
    pub threshold: Option<u32>,
}

/// Executes the analyze command.
pub fn run(args: Args) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Could not read text from stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        anyhow::bail!("No text provided");
    }

    let (store, config) = super::open_store(None)?;
    let threshold = args.threshold.unwrap_or_else(|| config.threshold());
    let capture = Capture::new(Analyzer::with_threshold(threshold), store);

    if args.present {
        let report = capture.present(&text);
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => print_presentation(&report),
        }
    } else {
        let report = capture.analyze(&text);
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                println!("Found {} items:", report.count);
                for item in &report.items {
                    let preview: String = item.item.text.chars().take(80).collect();
                    println!();
                    println!("- {}: {}", item.item.item_type.to_string().bold(), preview);
                    println!(
                        "  Score: {}, Confidence: {:.1}%",
                        item.item.score,
                        item.item.confidence * 100.0
                    );
                }
            }
        }
    }

    Ok(())
}

/// Prints the full presentation in text format with colors.
fn print_presentation(report: &PresentationReport) {
    println!(
        "Analyzed your input. Found {} potential governance items:",
        report.count.to_string().bold()
    );

    for item in &report.items {
        println!();
        println!("{}", "─".repeat(60).dimmed());
        println!();
        println!(
            "{} {}: {}",
            format!("{}.", item.number).bold(),
            item.item_type.to_string().cyan().bold(),
            item.title
        );
        println!();
        println!("   {}  {}", "Signals:".dimmed(), item.signals.join(", "));
        println!("   {}  {}", "Text:".dimmed(), item.text);
        println!();
        println!(
            "   {}  {}",
            "Suggested Category:".dimmed(),
            item.suggested_category
        );
        println!(
            "   {}  {}",
            "Suggested Priority/Severity:".dimmed(),
            item.suggested_priority
        );
        println!();
        println!("   Why {}? {}", item.item_type, item.explanation);
        println!(
            "   {}  {:.0}%",
            "Confidence:".dimmed(),
            item.confidence * 100.0
        );
    }
}
