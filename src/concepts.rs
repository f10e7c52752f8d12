use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static CONCEPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bconcept\s+(\w+)").expect("regex for concept tokens"));

static MAIN_CONCEPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmain concept\s+(\w+)").expect("regex for main concept tokens"));

/// Surface the word following "concept" or "main concept" anywhere in a model output
pub fn extract_concepts(text: &str) -> BTreeSet<String> {
    let mut concepts = BTreeSet::new();
    for pattern in [&*CONCEPT, &*MAIN_CONCEPT] {
        for cap in pattern.captures_iter(text) {
            if let Some(token) = cap.get(1) {
                concepts.insert(token.as_str().to_string());
            }
        }
    }
    concepts
}
