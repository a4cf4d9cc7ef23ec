//! End-to-end governance item extraction and capture.
//!
//! Composes the analyzer and the store: analysis and presentation never
//! touch the filesystem, while the capture operations allocate an ID and
//! insert the record, surfacing store errors unchanged. Presentation adds
//! suggested categories, priorities, and a short explanation synthesized
//! from each item's strongest signals.

use serde::Serialize;

use crate::analyzer::{Analyzer, GovernanceItem, ItemType};
use crate::store::{DecisionFields, IdeaFields, IssueFields, RecordKind, Store, StoreError};

/// Source annotation recorded for items captured through the analyzer path.
pub const AUTO_SOURCE: &str = "Automated extraction via govlog capture";

/// Maximum title length derived from extracted text.
const TITLE_MAX_CHARS: usize = 60;

/// How many signals an explanation cites.
const EXPLAIN_SIGNALS: usize = 3;

/// An analyzed item with store-facing suggestions attached.
#[derive(Debug, Serialize)]
pub struct AnalyzedItem {
    #[serde(flatten)]
    pub item: GovernanceItem,
    pub suggested_category: &'static str,
    pub suggested_priority: &'static str,
}

/// The result of analyzing a text.
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub items: Vec<AnalyzedItem>,
    pub count: usize,
}

/// A numbered item formatted for user presentation.
#[derive(Debug, Serialize)]
pub struct PresentedItem {
    pub number: usize,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub text: String,
    pub context: String,
    pub score: u32,
    pub confidence: f64,
    pub suggested_category: &'static str,
    pub suggested_priority: &'static str,
    pub signals: Vec<String>,
    pub explanation: String,
}

/// The result of preparing a text for presentation.
#[derive(Debug, Serialize)]
pub struct PresentationReport {
    pub items: Vec<PresentedItem>,
    pub count: usize,
}

/// Orchestrates extraction and durable capture.
pub struct Capture {
    analyzer: Analyzer,
    store: Store,
}

impl Capture {
    /// Creates an orchestrator over an analyzer and a store.
    pub fn new(analyzer: Analyzer, store: Store) -> Self {
        Self { analyzer, store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Captures an idea: allocates the next ID and inserts the record.
    ///
    /// The extracted `text` becomes the description when none is provided.
    /// Returns the created ID; store errors surface unchanged.
    pub fn capture_idea(&self, text: &str, mut fields: IdeaFields) -> Result<String, StoreError> {
        if fields.description.is_empty() {
            fields.description = text.to_string();
        }

        let id = self.store.next_id(RecordKind::Ideas)?;
        self.store.insert_idea(&id, &fields)?;
        tracing::info!(id = %id, "captured idea");
        Ok(id)
    }

    /// Captures an issue: allocates the next ID and inserts the record.
    pub fn capture_issue(&self, text: &str, mut fields: IssueFields) -> Result<String, StoreError> {
        if fields.description.is_empty() {
            fields.description = text.to_string();
        }

        let id = self.store.next_id(RecordKind::Issues)?;
        self.store.insert_issue(&id, &fields)?;
        tracing::info!(id = %id, "captured issue");
        Ok(id)
    }

    /// Captures a decision: allocates the next ID and inserts the record.
    pub fn capture_decision(
        &self,
        text: &str,
        mut fields: DecisionFields,
    ) -> Result<String, StoreError> {
        if fields.decision.is_empty() {
            fields.decision = text.to_string();
        }

        let id = self.store.next_id(RecordKind::Decisions)?;
        self.store.insert_decision(&id, &fields)?;
        tracing::info!(id = %id, "captured decision");
        Ok(id)
    }

    /// Analyzes text into items with suggestions attached.
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let items: Vec<AnalyzedItem> = self
            .analyzer
            .analyze(text)
            .into_iter()
            .map(|item| AnalyzedItem {
                suggested_category: self.analyzer.suggest_category(&item),
                suggested_priority: self.analyzer.suggest_priority(&item),
                item,
            })
            .collect();

        AnalysisReport {
            count: items.len(),
            items,
        }
    }

    /// Analyzes text and formats the items for user presentation.
    pub fn present(&self, text: &str) -> PresentationReport {
        let items: Vec<PresentedItem> = self
            .analyzer
            .analyze(text)
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let suggested_category = self.analyzer.suggest_category(&item);
                let suggested_priority = self.analyzer.suggest_priority(&item);
                PresentedItem {
                    number: i + 1,
                    item_type: item.item_type,
                    title: derive_title(&item.text),
                    explanation: explain(&item),
                    suggested_category,
                    suggested_priority,
                    text: item.text,
                    context: item.context,
                    score: item.score,
                    confidence: item.confidence,
                    signals: item.signals,
                }
            })
            .collect();

        PresentationReport {
            count: items.len(),
            items,
        }
    }
}

/// Derives a short title from extracted text: the first 60 characters,
/// with an ellipsis when truncated.
pub fn derive_title(text: &str) -> String {
    let prefix: String = text.chars().take(TITLE_MAX_CHARS).collect();
    let title = prefix.trim().to_string();

    if text.chars().count() > TITLE_MAX_CHARS {
        format!("{title}...")
    } else {
        title
    }
}

/// Explains a classification from its top signals, keyed by type.
fn explain(item: &GovernanceItem) -> String {
    let cited: Vec<String> = item
        .signals
        .iter()
        .take(EXPLAIN_SIGNALS)
        .map(|signal| {
            let value = signal.splitn(2, ':').nth(1).unwrap_or(signal);
            format!("\"{value}\"")
        })
        .collect();
    let cited = cited.join(", ");

    match item.item_type {
        ItemType::Issue => format!("Identified problem signals: {cited}"),
        ItemType::Idea => format!("Solution-oriented signals: {cited}"),
        ItemType::Decision => format!("Decision-making signals: {cited}"),
        ItemType::Lesson => format!("Learning signals: {cited}"),
        ItemType::Task => format!("Action signals: {cited}"),
    }
}
