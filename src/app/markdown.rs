//! The small markdown dialect the model is asked to write.
//!
//! Line oriented: each input line becomes at most one [`Block`], blank lines
//! are dropped. Prefix checks run in a fixed order, so `### ` wins over `## `
//! and a line starting with `---` is always a divider.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `## ` heading, the heavier of the two levels.
    Heading2(String),
    /// `### ` heading.
    Heading3(String),
    Divider,
    ListItem(Vec<Span>),
    Paragraph(Vec<Span>),
}

fn bold_regex() -> &'static Regex {
    static BOLD_RE: OnceLock<Regex> = OnceLock::new();
    BOLD_RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap())
}

pub fn parse_markdown(text: &str) -> Vec<Block> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Block> {
    if let Some(rest) = line.strip_prefix("### ") {
        return Some(Block::Heading3(rest.to_string()));
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return Some(Block::Heading2(rest.to_string()));
    }
    if line.starts_with("---") {
        return Some(Block::Divider);
    }

    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix("* ") {
        return Some(Block::ListItem(parse_spans(rest)));
    }
    if !trimmed.is_empty() {
        return Some(Block::Paragraph(parse_spans(line)));
    }
    None
}

/// Splits inline text on `**bold**` pairs. An unpaired `**` stays plain.
pub fn parse_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in bold_regex().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            spans.push(Span::Plain(text[cursor..whole.start()].to_string()));
        }
        if !inner.as_str().is_empty() {
            spans.push(Span::Bold(inner.as_str().to_string()));
        }
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(Span::Plain(text[cursor..].to_string()));
    }
    spans
}
