//! Pattern-based extraction of governance items from free-form text.
//!
//! The analyzer is a pure function over its input: no I/O, no shared state,
//! and deterministic output for identical input. Sentences are scored
//! against per-type keyword and phrase catalogs, the winning type is kept
//! when its score clears the detection threshold, and adjacent fragments of
//! the same type are merged back together before duplicates are dropped.

pub mod signals;

use regex::Regex;
use serde::Serialize;

use signals::{SignalCatalog, CATEGORIES, HIGH_URGENCY, LOW_URGENCY};

/// Minimum sentence score for an item to be emitted.
pub const DEFAULT_THRESHOLD: u32 = 2;

/// The closed set of governance item types.
///
/// The variant order is significant: it is the catalog iteration order, and
/// score ties between types resolve to the first maximum in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    /// Something broken, missing, or uncertain.
    Issue,
    /// A proposal or improvement opportunity.
    Idea,
    /// A choice to be made or recorded.
    Decision,
    /// An insight or retrospective observation.
    Lesson,
    /// A concrete follow-up action.
    Task,
}

impl ItemType {
    /// All item types in catalog iteration order.
    pub const ALL: [ItemType; 5] = [
        ItemType::Issue,
        ItemType::Idea,
        ItemType::Decision,
        ItemType::Lesson,
        ItemType::Task,
    ];

    /// The signal catalog for this type.
    fn catalog(self) -> &'static SignalCatalog {
        match self {
            ItemType::Issue => &signals::ISSUE_SIGNALS,
            ItemType::Idea => &signals::IDEA_SIGNALS,
            ItemType::Decision => &signals::DECISION_SIGNALS,
            ItemType::Lesson => &signals::LESSON_SIGNALS,
            ItemType::Task => &signals::TASK_SIGNALS,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Issue => write!(f, "ISSUE"),
            ItemType::Idea => write!(f, "IDEA"),
            ItemType::Decision => write!(f, "DECISION"),
            ItemType::Lesson => write!(f, "LESSON"),
            ItemType::Task => write!(f, "TASK"),
        }
    }
}

/// An extracted governance item.
///
/// Items exist only for the duration of one analysis call; they are handed
/// to the capture layer or presented and then discarded, never persisted
/// verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct GovernanceItem {
    /// Classified type.
    #[serde(rename = "type")]
    pub item_type: ItemType,

    /// The matched sentence span (merged across sentence boundaries when
    /// the continuation heuristic fires).
    pub text: String,

    /// One sentence before and after, space-joined.
    pub context: String,

    /// Sum of matched signal weights for the winning type.
    pub score: u32,

    /// Calibrated confidence: 0.9, 0.7, or 0.4.
    pub confidence: f64,

    /// Matched signals as "keyword:<value>" / "phrase:<value>" tags, in
    /// match discovery order. Merging concatenates; duplicates are allowed.
    pub signals: Vec<String>,
}

/// Analyzes text for governance items using pattern matching.
pub struct Analyzer {
    threshold: u32,
    sentence_re: Regex,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer with the default detection threshold.
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    /// Creates an analyzer with a custom detection threshold.
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold,
            sentence_re: Regex::new(r"[.!?]+\s+").expect("valid sentence splitter"),
        }
    }

    /// Extracts governance items from `text`.
    ///
    /// Empty or whitespace-only input yields an empty list. This function
    /// never fails: malformed input produces fewer items, not errors.
    pub fn analyze(&self, text: &str) -> Vec<GovernanceItem> {
        let sentences = self.split_sentences(text);

        let mut items = Vec::new();

        for (i, sentence) in sentences.iter().enumerate() {
            let lowered = sentence.to_lowercase();

            let mut scores = [0u32; 5];
            let mut matched: Vec<Vec<String>> = Vec::with_capacity(5);

            for (slot, item_type) in ItemType::ALL.iter().enumerate() {
                let (score, signals) = score_sentence(&lowered, item_type.catalog());
                scores[slot] = score;
                matched.push(signals);
            }

            // First maximum wins ties, in catalog order.
            let (winner, &max_score) = scores
                .iter()
                .enumerate()
                .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
                .expect("five scores");

            if max_score >= self.threshold {
                items.push(GovernanceItem {
                    item_type: ItemType::ALL[winner],
                    text: sentence.trim().to_string(),
                    context: context_window(&sentences, i),
                    score: max_score,
                    confidence: confidence(&scores),
                    signals: std::mem::take(&mut matched[winner]),
                });
            }
        }

        let items = merge_related(items);
        deduplicate(items)
    }

    /// Suggests a category for an item from its text.
    ///
    /// The category table is checked in a fixed order and the first category
    /// with any keyword hit wins. Falls back to a per-type default.
    pub fn suggest_category(&self, item: &GovernanceItem) -> &'static str {
        let lowered = item.text.to_lowercase();

        for (category, keywords) in CATEGORIES {
            if keywords.iter().any(|kw| lowered.contains(kw)) {
                return category;
            }
        }

        match item.item_type {
            ItemType::Idea => "Automation",
            _ => "Process",
        }
    }

    /// Suggests a priority (ideas) or severity (issues) for an item.
    ///
    /// HIGH takes precedence over LOW when both kinds of urgency keywords
    /// are present.
    pub fn suggest_priority(&self, item: &GovernanceItem) -> &'static str {
        let lowered = item.text.to_lowercase();

        if HIGH_URGENCY.iter().any(|kw| lowered.contains(kw)) {
            "HIGH"
        } else if LOW_URGENCY.iter().any(|kw| lowered.contains(kw)) {
            "LOW"
        } else {
            "MEDIUM"
        }
    }

    /// Splits text into trimmed, non-empty sentences on `.`/`!`/`?`
    /// followed by whitespace.
    fn split_sentences(&self, text: &str) -> Vec<String> {
        self.sentence_re
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Scores one lower-cased sentence against a catalog.
///
/// Keywords are worth 1, phrases 2; matched signals are recorded in catalog
/// order with their kind tag.
fn score_sentence(sentence: &str, catalog: &SignalCatalog) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut matched = Vec::new();

    for keyword in catalog.keywords {
        if sentence.contains(keyword) {
            score += 1;
            matched.push(format!("keyword:{keyword}"));
        }
    }

    for phrase in catalog.phrases {
        if sentence.contains(phrase) {
            score += 2;
            matched.push(format!("phrase:{phrase}"));
        }
    }

    (score, matched)
}

/// Builds the neighbor-inclusive context window for sentence `index`.
fn context_window(sentences: &[String], index: usize) -> String {
    let mut context = Vec::with_capacity(3);

    if index > 0 {
        context.push(sentences[index - 1].as_str());
    }
    context.push(sentences[index].as_str());
    if index + 1 < sentences.len() {
        context.push(sentences[index + 1].as_str());
    }

    context.join(" ")
}

/// Calibrates confidence from the score distribution across all types.
///
/// A single dominant type (> 70% of the total) is high confidence; a bare
/// majority is medium; anything more ambiguous is low.
fn confidence(scores: &[u32; 5]) -> f64 {
    let total: u32 = scores.iter().sum();
    let max = *scores.iter().max().expect("five scores");

    if total == 0 {
        return 0.0;
    }

    let ratio = f64::from(max) / f64::from(total);

    if ratio > 0.7 {
        0.9
    } else if ratio > 0.5 {
        0.7
    } else {
        0.4
    }
}

/// Merges adjacent items of the same type when the second looks like a
/// continuation split off by the naive sentence splitter.
fn merge_related(items: Vec<GovernanceItem>) -> Vec<GovernanceItem> {
    if items.len() <= 1 {
        return items;
    }

    let mut iter = items.into_iter();
    let mut current = iter.next().expect("non-empty");
    let mut merged = Vec::new();

    for next in iter {
        if current.item_type == next.item_type && is_continuation(&current.text, &next.text) {
            current.text = format!("{} {}", current.text, next.text);
            current.context = format!("{} {}", current.context, next.context);
            current.score = current.score.max(next.score);
            current.signals.extend(next.signals);
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}

/// Continuation heuristic: the second fragment starts lower-case, or the
/// first does not end with a period.
fn is_continuation(first: &str, second: &str) -> bool {
    if second.chars().next().is_some_and(char::is_lowercase) {
        return true;
    }

    !first.trim_end().ends_with('.')
}

/// Drops items whose normalized text matches an earlier item; first
/// occurrence wins and relative order is preserved.
fn deduplicate(items: Vec<GovernanceItem>) -> Vec<GovernanceItem> {
    let mut seen = std::collections::HashSet::new();
    let mut unique = Vec::new();

    for item in items {
        let normalized = item.text.to_lowercase().trim().to_string();
        if seen.insert(normalized) {
            unique.push(item);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_type: ItemType, text: &str) -> GovernanceItem {
        GovernanceItem {
            item_type,
            text: text.to_string(),
            context: text.to_string(),
            score: 2,
            confidence: 0.9,
            signals: vec!["keyword:test".to_string()],
        }
    }

    #[test]
    fn test_empty_input_yields_no_items() {
        let analyzer = Analyzer::new();
        assert!(analyzer.analyze("").is_empty());
        assert!(analyzer.analyze("   \n\t  ").is_empty());
    }

    #[test]
    fn test_plain_prose_yields_no_items() {
        let analyzer = Analyzer::new();
        let items = analyzer.analyze("The sky was clear today. Birds flew south.");
        assert!(items.is_empty());
    }

    #[test]
    fn test_issue_keyword_plus_phrase_scores_at_least_three() {
        let analyzer = Analyzer::new();
        let items = analyzer.analyze("It's broken and we can't rely on this. Anyway.");

        let issue = items
            .iter()
            .find(|i| i.item_type == ItemType::Issue)
            .expect("issue item");
        assert!(issue.score >= 3, "keyword (1) + phrase (2), got {}", issue.score);
        assert!([0.4, 0.7, 0.9].contains(&issue.confidence));
    }

    #[test]
    fn test_signals_record_kind_and_value() {
        let analyzer = Analyzer::new();
        let items = analyzer.analyze("The deploy is broken and we can't rely on the pipeline. Fine.");

        let issue = &items[0];
        assert!(issue.signals.contains(&"keyword:broken".to_string()));
        assert!(issue.signals.contains(&"phrase:we can't rely on".to_string()));
    }

    #[test]
    fn test_threshold_filters_single_keyword_sentences() {
        let analyzer = Analyzer::new();
        // "bug" alone scores 1, below the default threshold of 2.
        let items = analyzer.analyze("There is a bug. The weather is nice today.");
        assert!(items.is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let analyzer = Analyzer::with_threshold(1);
        let items = analyzer.analyze("There is a bug. The weather is nice today.");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_type, ItemType::Issue);
    }

    #[test]
    fn test_tie_resolves_to_catalog_order() {
        // ISSUE scores 2 ("bug", "error") and IDEA scores 2 ("automate",
        // "improve"); the first maximum in catalog order is ISSUE.
        let analyzer = Analyzer::new();
        let items = analyzer.analyze("We hit a bug error so automate and improve. Done now.");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_type, ItemType::Issue);
    }

    #[test]
    fn test_upper_case_catalog_entries_never_match() {
        // Sentences are lower-cased before matching but the catalogs are
        // not, so the "TODO" keyword and the "go with X or Y" phrase can
        // never fire. Here "todo" must contribute nothing: ISSUE ("bug",
        // "error") and TASK ("must", "follow up") tie at 2 and ISSUE wins
        // by catalog order. A live "todo" keyword would flip this to TASK.
        let analyzer = Analyzer::new();
        let items =
            analyzer.analyze("We hit a bug error on the todo import and must follow up. Done.");

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item_type, ItemType::Issue);
        assert_eq!(items[0].score, 2);
        assert!(items[0].signals.iter().all(|s| s != "keyword:TODO"));

        // The dead DECISION phrase contributes nothing either; "options"
        // alone stays under the threshold.
        assert!(analyzer.analyze("Go with x or y options here. Anyway.").is_empty());
    }

    #[test]
    fn test_context_includes_neighbors() {
        let analyzer = Analyzer::new();
        let items =
            analyzer.analyze("First sentence here. The build is broken, a real problem. Last one.");

        assert_eq!(items.len(), 1);
        assert!(items[0].context.contains("First sentence here"));
        assert!(items[0].context.contains("Last one"));
    }

    #[test]
    fn test_confidence_high_when_one_type_dominates() {
        let analyzer = Analyzer::new();
        let items = analyzer.analyze("We can't rely on the broken failing deploy. Sure.");

        assert_eq!(items[0].confidence, 0.9);
    }

    #[test]
    fn test_confidence_drops_for_ambiguous_sentences() {
        // ISSUE signals and TASK signals in the same sentence split the
        // total, pushing the ratio down.
        let analyzer = Analyzer::new();
        let items =
            analyzer.analyze("The bug is a problem and we need to investigate and follow up. Ok.");

        let item = &items[0];
        assert!(item.confidence < 0.9);
    }

    #[test]
    fn test_merge_lowercase_continuation() {
        let a = item(ItemType::Idea, "We could build a dashboard");
        let b = item(ItemType::Idea, "that shows governance metrics.");

        let merged = merge_related(vec![a, b]);

        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].text,
            "We could build a dashboard that shows governance metrics."
        );
    }

    #[test]
    fn test_merge_keeps_max_score_and_concatenates_signals() {
        let mut a = item(ItemType::Idea, "We could build a dashboard");
        a.score = 3;
        let mut b = item(ItemType::Idea, "that shows metrics.");
        b.score = 2;

        let merged = merge_related(vec![a, b]);

        assert_eq!(merged[0].score, 3);
        assert_eq!(merged[0].signals.len(), 2);
    }

    #[test]
    fn test_no_merge_across_types() {
        let a = item(ItemType::Issue, "The sync is broken, a known problem");
        let b = item(ItemType::Idea, "we could build a workaround.");

        let merged = merge_related(vec![a, b]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_no_merge_when_separated_by_period_and_uppercase() {
        let a = item(ItemType::Idea, "We could build a dashboard.");
        let b = item(ItemType::Idea, "We could automate the report.");

        let merged = merge_related(vec![a, b]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let a = item(ItemType::Idea, "We could automate this");
        let mut b = item(ItemType::Idea, "we could automate this  ");
        b.score = 5;

        let unique = deduplicate(vec![a, b]);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].score, 2, "first occurrence wins");
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let analyzer = Analyzer::new();
        let text = "The import is broken and missing retries. We could automate recovery, \
                    we should create a runbook. We learned that turned out badly before.";

        let first = analyzer.analyze(text);
        let second = analyzer.analyze(text);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.item_type, b.item_type);
            assert_eq!(a.text, b.text);
            assert_eq!(a.score, b.score);
            assert_eq!(a.signals, b.signals);
        }
    }

    #[test]
    fn test_suggest_category_table_order() {
        let analyzer = Analyzer::new();

        // "automate" hits Automation before anything else.
        let auto = item(ItemType::Idea, "We could automate the broken report");
        assert_eq!(analyzer.suggest_category(&auto), "Automation");

        let bug = item(ItemType::Issue, "The parser crash is a bug");
        assert_eq!(analyzer.suggest_category(&bug), "Bug");
    }

    #[test]
    fn test_suggest_category_defaults_by_type() {
        let analyzer = Analyzer::new();

        let idea = item(ItemType::Idea, "Something nonspecific");
        assert_eq!(analyzer.suggest_category(&idea), "Automation");

        let issue = item(ItemType::Issue, "Something nonspecific");
        assert_eq!(analyzer.suggest_category(&issue), "Process");

        let task = item(ItemType::Task, "Something nonspecific");
        assert_eq!(analyzer.suggest_category(&task), "Process");
    }

    #[test]
    fn test_suggest_priority_high_beats_low() {
        let analyzer = Analyzer::new();

        let both = item(ItemType::Issue, "A critical but cosmetic detail");
        assert_eq!(analyzer.suggest_priority(&both), "HIGH");

        let low = item(ItemType::Idea, "A nice to have touch");
        assert_eq!(analyzer.suggest_priority(&low), "LOW");

        let neither = item(ItemType::Idea, "A plain improvement");
        assert_eq!(analyzer.suggest_priority(&neither), "MEDIUM");
    }

    #[test]
    fn test_item_type_display_and_order() {
        assert_eq!(ItemType::Issue.to_string(), "ISSUE");
        assert_eq!(ItemType::Task.to_string(), "TASK");
        assert_eq!(ItemType::ALL[0], ItemType::Issue);
        assert_eq!(ItemType::ALL[4], ItemType::Task);
    }

    #[test]
    fn test_item_serializes_with_uppercase_type_tag() {
        let json = serde_json::to_string(&item(ItemType::Lesson, "We learned that x")).unwrap();
        assert!(json.contains("\"type\":\"LESSON\""));
    }
}
