//! Heuristic title and project inference from free text.

/// Keyword table for project inference. Categories are tested in order and
/// the first match wins; ties are resolved by table position.
const PROJECT_KEYWORDS: &[(&str, &[&str])] = &[
    ("voice-notes", &["voice", "audio", "transcript", "whisper"]),
    ("docs", &["document", "markdown", "readme", "manual"]),
    ("api", &["endpoint", "rest", "http", "request", "response"]),
    ("ui", &["button", "interface", "design", "component", "react"]),
    ("database", &["query", "sql", "database", "table", "schema"]),
];

pub const UNKNOWN_PROJECT: &str = "unknown";

/// Generate a short title from the first significant line of text.
///
/// Header lines (starting with `**`) and blank lines are skipped; whole
/// words are accumulated up to the character budget and trailing periods
/// stripped. Deterministic for a given input.
pub fn generate_title(text: &str, max_length: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    let mut char_count = 0;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("**") {
            continue;
        }

        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            if char_count + word_len + 1 <= max_length {
                parts.push(word);
                char_count += word_len + 1;
            } else {
                break;
            }
        }

        if char_count > 0 {
            break;
        }
    }

    let title: String = parts.join(" ").chars().take(max_length).collect();
    title.trim_end_matches('.').to_string()
}

/// Infer a coarse project category from content keywords.
///
/// Falls back to "unknown" when nothing in the table matches.
pub fn infer_project_name(text: &str) -> String {
    let text_lower = text.to_lowercase();

    for (project, keywords) in PROJECT_KEYWORDS {
        if keywords.iter().any(|kw| text_lower.contains(kw)) {
            return (*project).to_string();
        }
    }

    UNKNOWN_PROJECT.to_string()
}
