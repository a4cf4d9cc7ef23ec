//! Record field sets and their markdown block layouts.
//!
//! Each persisted record family carries its own fields. Formatting is pure:
//! the block functions take the date as a string so callers (and tests)
//! control it. Blocks are spliced into the backing file directly after the
//! section anchor and are terminated by a horizontal rule.

use serde::{Deserialize, Serialize};

use super::RecordKind;

/// Default source annotation for manual captures.
pub const DEFAULT_SOURCE: &str = "User capture";

/// Fields for an idea record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaFields {
    /// Short title.
    pub title: String,
    /// Category, e.g. "Automation".
    pub category: String,
    /// HIGH / MEDIUM / LOW.
    pub priority: String,
    /// Full description.
    pub description: String,
    /// Justification; "See description" when empty.
    pub why_needed: String,
    /// Blocking item, or "None".
    pub blocker: String,
    /// LOW / MEDIUM / HIGH.
    pub effort: String,
    /// Related record IDs.
    pub related: Vec<String>,
    /// Validation checklist entries.
    pub validation: Vec<String>,
    /// How this record was captured.
    pub source: String,
}

impl Default for IdeaFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            category: String::new(),
            priority: "MEDIUM".to_string(),
            description: String::new(),
            why_needed: String::new(),
            blocker: "None".to_string(),
            effort: "MEDIUM".to_string(),
            related: Vec::new(),
            validation: Vec::new(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl IdeaFields {
    /// Renders the record block for this idea.
    pub fn format_block(&self, id: &str, today: &str) -> String {
        let why_needed = if self.why_needed.is_empty() {
            "See description"
        } else {
            &self.why_needed
        };
        let related = join_related(&self.related);
        let validation = if self.validation.is_empty() {
            "- [ ] Implementation complete".to_string()
        } else {
            self.validation
                .iter()
                .map(|item| format!("- [ ] {item}"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "\n### {id}: {title}\n\n\
             **Category:** {category}\n\
             **Priority:** {priority}\n\
             **Status:** Parking\n\
             **Added:** {today}\n\
             **Source:** {source}\n\n\
             **Description:** {description}\n\n\
             **Why Needed:** {why_needed}\n\n\
             **Blocker:** {blocker}\n\n\
             **Effort:** {effort}\n\n\
             **Related:** {related}\n\n\
             **Validation:**\n{validation}\n\n\
             ---\n\n",
            title = self.title,
            category = self.category,
            priority = self.priority,
            source = self.source,
            description = self.description,
            blocker = self.blocker,
            effort = self.effort,
        )
    }
}

/// Fields for an issue record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    /// Short title.
    pub title: String,
    /// CRITICAL / HIGH / MEDIUM / LOW.
    pub severity: String,
    /// Category, e.g. "Bug".
    pub category: String,
    /// Full description.
    pub description: String,
    /// What fails if not fixed; "See description" when empty.
    pub impact: String,
    /// Resolution steps, numbered in the block.
    pub resolution: Vec<String>,
    /// Related record IDs.
    pub related: Vec<String>,
    /// How this record was captured.
    pub source: String,
}

impl Default for IssueFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            severity: "MEDIUM".to_string(),
            category: String::new(),
            description: String::new(),
            impact: String::new(),
            resolution: Vec::new(),
            related: Vec::new(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl IssueFields {
    /// Renders the record block for this issue.
    pub fn format_block(&self, id: &str, today: &str) -> String {
        let impact = if self.impact.is_empty() {
            "See description"
        } else {
            &self.impact
        };
        let resolution = if self.resolution.is_empty() {
            "1. Investigate and resolve".to_string()
        } else {
            self.resolution
                .iter()
                .enumerate()
                .map(|(i, step)| format!("{}. {step}", i + 1))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let related = join_related(&self.related);

        format!(
            "\n### {id} | {today} | OPEN | {severity} | {title}\n\n\
             **Severity:** {severity}\n\
             **Category:** {category}\n\
             **Discovered:** {today}\n\
             **Source:** {source}\n\n\
             **Description:** {description}\n\n\
             **Impact:** {impact}\n\n\
             **Resolution Required:**\n{resolution}\n\n\
             **Related:** {related}\n\n\
             **Status:** OPEN\n\n\
             ---\n\n",
            severity = self.severity,
            title = self.title,
            category = self.category,
            source = self.source,
            description = self.description,
        )
    }
}

/// Fields for a decision record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionFields {
    /// Short title.
    pub title: String,
    /// Accepted / Superseded / Revisit.
    pub status: String,
    /// The situation that forced a choice.
    pub context: String,
    /// What was decided.
    pub decision: String,
    /// What follows from the choice.
    pub consequences: String,
    /// Related record IDs.
    pub related: Vec<String>,
    /// How this record was captured.
    pub source: String,
}

impl Default for DecisionFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            status: "Accepted".to_string(),
            context: String::new(),
            decision: String::new(),
            consequences: String::new(),
            related: Vec::new(),
            source: DEFAULT_SOURCE.to_string(),
        }
    }
}

impl DecisionFields {
    /// Renders the record block for this decision.
    pub fn format_block(&self, id: &str, today: &str) -> String {
        let related = join_related(&self.related);

        format!(
            "\n### {id}: {title}\n\n\
             **Status:** {status}\n\
             **Date:** {today}\n\
             **Source:** {source}\n\n\
             **Context:** {context}\n\n\
             **Decision:** {decision}\n\n\
             **Consequences:** {consequences}\n\n\
             **Related:** {related}\n\n\
             ---\n\n",
            title = self.title,
            status = self.status,
            source = self.source,
            context = self.context,
            decision = self.decision,
            consequences = self.consequences,
        )
    }
}

fn join_related(related: &[String]) -> String {
    if related.is_empty() {
        "None".to_string()
    } else {
        related.join(", ")
    }
}

/// Starter content for a fresh backing file: the metadata header and the
/// section anchor that inserts splice after.
pub fn starter_content(kind: RecordKind, today: &str) -> String {
    match kind {
        RecordKind::Ideas => format!(
            "# Ideas Backlog\n\n\
             **Last Updated:** {today}\n\
             **Total Ideas:** 0 (next available: IDEA-001)\n\n\
             ## Active Ideas\n"
        ),
        RecordKind::Issues => format!(
            "# Issues Tracker\n\n\
             **Last Updated:** {today}\n\
             **Summary:** 0 Open\n\n\
             ## Open Issues\n"
        ),
        RecordKind::Decisions => format!(
            "# Decisions Log\n\n\
             **Last Updated:** {today}\n\
             **Total Decisions:** 0 (next available: DEC-001)\n\n\
             ## Decisions\n"
        ),
    }
}
