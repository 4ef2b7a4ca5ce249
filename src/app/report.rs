use crate::app::chart::render_chart;
use crate::app::markdown::{parse_markdown, Block, Span};
use crate::domain::model::{SajuResult, Topic};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const AMBER: &str = "\x1b[38;5;178m";
const PINK: &str = "\x1b[38;5;205m";
const RED: &str = "\x1b[38;5;160m";

const RULE_WIDTH: usize = 60;

/// Terminal styling for one report. `plain()` emits no escape codes.
#[derive(Debug, Clone)]
pub struct Style {
    accent: &'static str,
    color: bool,
}

impl Style {
    pub fn for_topic(topic: Topic, color: bool) -> Self {
        let accent = match topic {
            Topic::Love => PINK,
            Topic::Wealth => AMBER,
        };
        Self { accent, color }
    }

    pub fn plain() -> Self {
        Self {
            accent: AMBER,
            color: false,
        }
    }

    fn paint(&self, codes: &[&str], text: &str) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        format!("{}{}{}", codes.concat(), text, RESET)
    }

    pub fn strong(&self, text: &str) -> String {
        self.paint(&[BOLD], text)
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(&[self.accent], text)
    }

    pub fn accent_strong(&self, text: &str) -> String {
        self.paint(&[BOLD, self.accent], text)
    }

    fn error(&self, text: &str) -> String {
        self.paint(&[BOLD, RED], text)
    }
}

fn render_spans(spans: &[Span], style: &Style) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Bold(text) => style.accent_strong(text),
        })
        .collect()
}

pub fn render_blocks(blocks: &[Block], style: &Style) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            Block::Heading2(text) => {
                out.push('\n');
                out.push_str(&style.strong(&"═".repeat(RULE_WIDTH)));
                out.push('\n');
                out.push_str(&style.strong(&format!("  {}", text)));
                out.push('\n');
                out.push_str(&style.strong(&"═".repeat(RULE_WIDTH)));
                out.push_str("\n\n");
            }
            Block::Heading3(text) => {
                out.push('\n');
                out.push_str(&style.accent_strong(text));
                out.push('\n');
                out.push_str(&"─".repeat(RULE_WIDTH));
                out.push('\n');
            }
            Block::Divider => {
                out.push('\n');
                out.push_str(&"┄".repeat(RULE_WIDTH));
                out.push_str("\n\n");
            }
            Block::ListItem(spans) => {
                out.push_str("  • ");
                out.push_str(&render_spans(spans, style));
                out.push('\n');
            }
            Block::Paragraph(spans) => {
                out.push_str(&render_spans(spans, style));
                out.push_str("\n\n");
            }
        }
    }
    out
}

/// Full report: title, chart when the series is present, narrative, closing note.
pub fn render_report(result: &SajuResult, topic: Topic, style: &Style) -> String {
    let mut out = String::new();

    out.push_str(&style.accent("CHEON-GI SAJU ANALYSIS"));
    out.push('\n');
    out.push_str(&style.strong(&format!("{} 정밀 분석", topic.label())));
    out.push_str("\n\n");

    if result.has_series() {
        out.push_str(&render_chart(&result.monthly_luck, style));
        out.push('\n');
    }

    out.push_str(&render_blocks(&parse_markdown(&result.narrative_text), style));

    out.push_str(&"─".repeat(RULE_WIDTH));
    out.push('\n');
    out.push_str("운명은 정해진 것이 아니라, 당신의 의지로 만들어가는 것입니다.\n");
    out.push_str("이 분석이 당신의 길에 작은 등불이 되기를 바랍니다.\n");
    out
}

/// Shown instead of a report. Never combined with partial results.
pub fn render_error_panel(message: &str, style: &Style) -> String {
    format!(
        "{}\n{}\n\n다시 시도하려면 같은 명령을 다시 실행하세요.\n",
        style.error("오류 발생"),
        message
    )
}
