//! Metadata header block embedded at the top of produced documents.
//!
//! A document is considered to carry a header only when a `**Source**:` line
//! is present; the other fields are optional and default when missing. The
//! header is what makes an artifact self-describing and safe to re-process.

use chrono::Local;
use regex::Regex;
use std::sync::LazyLock;

pub mod infer;

pub use infer::{generate_title, infer_project_name};

pub const STATUS_AWAITING_TRANSFORMATION: &str = "Awaiting transformation";
pub const STATUS_AWAITING_INGEST: &str = "Awaiting ingest";
pub const STATUS_STRUCTURED: &str = "Structured from voice";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub source: String,
    pub date: String,
    pub status: String,
    pub title: Option<String>,
    pub project: Option<String>,
}

// The patterns are fixed literals; a compile failure here is a programmer
// error and panics on first use rather than hiding as a parse miss.
static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| field_regex(r"(?m)^\*\*Source\*\*:\s*(.+)$"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| field_regex(r"(?m)^\*\*Date:\*\*\s*(.+)$"));
static STATUS_RE: LazyLock<Regex> = LazyLock::new(|| field_regex(r"(?m)^\*\*Status:\*\*\s*(.+)$"));
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| field_regex(r"(?m)^\*\*Title:\*\*\s*(.+)$"));
static PROJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| field_regex(r"(?m)^\*\*Project:\*\*\s*(.+)$"));

fn field_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("header field pattern must compile")
}

fn capture_field(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).map(|c| c[1].trim().to_string())
}

impl Header {
    pub fn new(source: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status: status.into(),
            title: None,
            project: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Parse a header out of document text.
    ///
    /// Returns None when no `**Source**:` line is found; that line is the
    /// sole presence signal.
    pub fn parse(text: &str) -> Option<Self> {
        let source = capture_field(&SOURCE_RE, text)?;

        let date = capture_field(&DATE_RE, text)
            .unwrap_or_else(|| Local::now().format("%Y-%m-%d %H:%M:%S").to_string());
        let status = capture_field(&STATUS_RE, text)
            .unwrap_or_else(|| STATUS_AWAITING_TRANSFORMATION.to_string());
        let title = capture_field(&TITLE_RE, text);
        let project = capture_field(&PROJECT_RE, text);

        Some(Self {
            source,
            date,
            status,
            title,
            project,
        })
    }

    /// Render the header as a fixed-order markdown block.
    ///
    /// Title and project lines appear only when their flag is set and the
    /// field is non-empty, so `parse(render(..))` is lossless only when both
    /// flags are true.
    pub fn render(&self, include_title: bool, include_project: bool) -> String {
        let mut lines = vec![
            format!("**Source**: {}", self.source),
            format!("**Date:** {}", self.date),
            format!("**Status:** {}", self.status),
        ];

        if include_title {
            if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
                lines.push(format!("**Title:** {title}"));
            }
        }

        if include_project {
            if let Some(project) = self.project.as_deref().filter(|p| !p.is_empty()) {
                lines.push(format!("**Project:** {project}"));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Header {
        Header {
            source: "recording-2026-01-26_14-30-45.wav".to_string(),
            date: "2026-01-26 14:30:45".to_string(),
            status: STATUS_AWAITING_TRANSFORMATION.to_string(),
            title: Some("Notes on the release".to_string()),
            project: Some("docs".to_string()),
        }
    }

    #[test]
    fn test_round_trip_with_all_fields() {
        let header = sample();
        let parsed = Header::parse(&header.render(true, true)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_round_trip_drops_optional_fields_when_excluded() {
        let header = sample();
        let parsed = Header::parse(&header.render(false, false)).unwrap();
        assert_eq!(parsed.source, header.source);
        assert_eq!(parsed.date, header.date);
        assert_eq!(parsed.status, header.status);
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.project, None);
    }

    #[test]
    fn test_parse_requires_source_line() {
        assert!(Header::parse("no markers here").is_none());
        assert!(Header::parse("**Status:** Awaiting transformation").is_none());
    }

    #[test]
    fn test_parse_defaults_missing_status() {
        let parsed = Header::parse("**Source**: somewhere").unwrap();
        assert_eq!(parsed.status, STATUS_AWAITING_TRANSFORMATION);
        assert!(parsed.title.is_none());
    }

    #[test]
    fn test_parse_finds_header_below_other_text() {
        let text = "leading line\n**Source**: memo.wav\n**Date:** 2026-01-01 00:00:00\n**Status:** Awaiting ingest\n\nbody";
        let parsed = Header::parse(text).unwrap();
        assert_eq!(parsed.source, "memo.wav");
        assert_eq!(parsed.status, "Awaiting ingest");
    }

    #[test]
    fn test_render_skips_empty_title() {
        let mut header = sample();
        header.title = Some(String::new());
        let rendered = header.render(true, true);
        assert!(!rendered.contains("**Title:**"));
        assert!(rendered.contains("**Project:** docs"));
    }
}
