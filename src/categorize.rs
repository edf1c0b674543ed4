//! Keyword-based topical classification.
//!
//! Rules are checked in order and the first match wins, so an article that
//! mentions both OPEC and refineries is filed under OPEC.

const RULES: &[(&str, &[&str])] = &[
    ("OPEC", &["opec"]),
    (
        "Natural Gas",
        &["natural gas", " lng ", "henry hub", "methane"],
    ),
    (
        "Refining",
        &["refin", "gasoline", "crack spread", "diesel", "jet fuel"],
    ),
    (
        "International",
        &["geopolitic", "sanction", "tariff", "conflict", "war "],
    ),
    (
        "Inventory",
        &["inventor", "stockpile", "storage", " eia ", "crude stock"],
    ),
    (
        "Extraction",
        &[
            "drill",
            "extract",
            "upstream",
            "shale",
            "rig count",
            "permian",
            "offshore",
        ],
    ),
    (
        "Technology",
        &[
            "technolog",
            "engineer",
            "innovat",
            "carbon capture",
            "hydrogen",
        ],
    ),
    ("Demand", &["demand", "consumption", "import"]),
    ("Supply", &["supply", "production", "output"]),
];

/// Lowercased `title summary`, the text the rules are matched against.
pub fn combined_text(title: &str, summary: &str) -> String {
    format!("{} {}", title, summary).to_lowercase()
}

/// First rule matching `text`, if any. `text` must already be lowercase.
pub fn classify(text: &str) -> Option<&'static str> {
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
}

pub fn categorize(text: &str, default_category: &str) -> String {
    classify(text).unwrap_or(default_category).to_string()
}
