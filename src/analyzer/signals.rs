//! Fixed signal catalogs used by the analyzer.
//!
//! Each governance item type has a catalog of keywords (weight 1) and more
//! specific phrases (weight 2). Phrases intentionally overlap keywords: a
//! sentence containing "we can't rely on" also matches the "broken"-style
//! keyword scan independently, and both contribute to the score.

/// A keyword/phrase catalog for a single item type.
pub struct SignalCatalog {
    /// Substring matches worth 1 point each.
    pub keywords: &'static [&'static str],
    /// Substring matches worth 2 points each (more specific).
    pub phrases: &'static [&'static str],
}

pub const ISSUE_SIGNALS: SignalCatalog = SignalCatalog {
    keywords: &[
        "broken",
        "doesn't work",
        "failing",
        "not working",
        "bug",
        "error",
        "gap",
        "missing",
        "lacking",
        "unclear",
        "uncertain",
        "not sure if",
        "don't know if",
        "problem",
        "issue",
        "blocker",
        "stuck",
    ],
    phrases: &[
        "we can't rely on",
        "no way to",
        "doesn't ensure",
        "doesn't guarantee",
        "uncertain whether",
        "not sure if our",
    ],
};

pub const IDEA_SIGNALS: SignalCatalog = SignalCatalog {
    keywords: &[
        "could",
        "should build",
        "need a way",
        "would be good to",
        "propose",
        "suggest",
        "recommend",
        "consider",
        "what if",
        "we could create",
        "automate",
        "improve",
    ],
    phrases: &[
        "we need a way to",
        "we could build",
        "would be good to have",
        "we should create",
        "opportunity to",
        "could improve by",
    ],
};

pub const DECISION_SIGNALS: SignalCatalog = SignalCatalog {
    keywords: &[
        "should we",
        "decide",
        "choose between",
        "options",
        "adopt",
        "reject",
        "trial",
        "evaluate",
    ],
    phrases: &[
        "should we adopt",
        "choose between",
        "decide whether to",
        "options are",
        "either/or",
        // Scoring lower-cases the sentence but not the catalog, so this
        // entry can never fire. Kept as-is.
        "go with X or Y",
    ],
};

pub const LESSON_SIGNALS: SignalCatalog = SignalCatalog {
    keywords: &[
        "learned",
        "discovered",
        "found out",
        "realized",
        "turned out",
        "it appears",
        "observation",
    ],
    phrases: &[
        "we learned that",
        "discovered that",
        "found out that",
        "turned out that",
        "key insight:",
        "lesson learned:",
    ],
};

pub const TASK_SIGNALS: SignalCatalog = SignalCatalog {
    keywords: &[
        "need to",
        "must",
        "should",
        // Dead entry: never matches a lower-cased sentence. Kept as-is.
        "TODO",
        "action item",
        "follow up",
        "contact",
        "reach out",
        "investigate",
    ],
    phrases: &[
        "need to contact",
        "must investigate",
        "should reach out",
        "follow up with",
        "next step:",
        "action:",
    ],
};

/// Category suggestion table, checked in order; the first category with any
/// keyword hit wins.
pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("Automation", &["automate", "automatic", "scheduled", "cron"]),
    (
        "Architecture",
        &["architecture", "design", "pattern", "structure"],
    ),
    ("Process", &["workflow", "process", "procedure", "method"]),
    ("Bug", &["bug", "broken", "error", "crash"]),
    ("Gap", &["missing", "lacking", "no way to", "doesn't have"]),
    ("Integration", &["integration", "connect", "sync", "link"]),
    ("Security", &["security", "credential", "auth", "permission"]),
    ("Performance", &["slow", "performance", "optimize", "faster"]),
];

/// Keywords that push a priority/severity suggestion to HIGH.
pub const HIGH_URGENCY: &[&str] = &[
    "critical",
    "blocking",
    "broken",
    "fails",
    "error",
    "urgent",
    "immediately",
    "must",
];

/// Keywords that push a priority/severity suggestion to LOW.
pub const LOW_URGENCY: &[&str] = &[
    "nice to have",
    "eventually",
    "minor",
    "small",
    "trivial",
    "cosmetic",
];
