// ABOUTME: Renders the interactive HTML report produced by the PDF-to-webpage tool.
// ABOUTME: Uses an Askama template; markdown content is rendered with pulldown-cmark with raw HTML neutralized.

use askama::Template;
use chrono::Utc;
use pulldown_cmark::{Event, Options, Parser, html};

use reviewdesk_core::StructuredSummary;

use crate::runtime::ExecutionError;

/// Regulatory keywords surfaced as tags when they appear in the content.
const ENTITY_KEYWORDS: &[&str] = &[
    "Biocompatibility",
    "ISO 10993",
    "ISO 14971",
    "IEC 60601-1",
    "IEC 62133",
    "Wireless Power Transfer",
    "Wireless charging",
    "Cybersecurity",
    "Neurostimulation",
    "Software V&V",
    "Sterilization",
    "Usability",
];

/// One row of the testing distribution chart.
#[derive(Debug, Clone)]
struct Bar {
    label: String,
    count: u32,
    percent: u32,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportPage<'a> {
    title: &'a str,
    generated_at: String,
    summary: Option<&'a StructuredSummary>,
    entities: Vec<&'static str>,
    bars: Vec<Bar>,
    body_html: String,
}

/// Render a self-contained report page for `content`, enriched with the
/// summary's figures when one is available.
///
/// The page has no scripts and no external resources. Markdown in `content`
/// is rendered; embedded HTML is shown as text.
pub fn render_report(
    content: &str,
    summary: Option<&StructuredSummary>,
) -> Result<String, ExecutionError> {
    let page = ReportPage {
        title: "Interactive 510(k) Summary Report",
        generated_at: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        summary,
        entities: extract_entities(content),
        bars: summary.map(testing_bars).unwrap_or_default(),
        body_html: markdown_to_html(content),
    };
    page.render()
        .map_err(|e| ExecutionError::Render(e.to_string()))
}

/// Render markdown to HTML, turning any raw HTML in the source into escaped text.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn extract_entities(content: &str) -> Vec<&'static str> {
    let haystack = content.to_lowercase();
    ENTITY_KEYWORDS
        .iter()
        .copied()
        .filter(|k| haystack.contains(&k.to_lowercase()))
        .collect()
}

fn testing_bars(summary: &StructuredSummary) -> Vec<Bar> {
    let max = summary
        .testing
        .iter()
        .map(|t| t.test_count)
        .max()
        .unwrap_or(0);
    summary
        .testing
        .iter()
        .map(|t| Bar {
            label: t.category.clone(),
            count: t.test_count,
            percent: if max == 0 { 0 } else { t.test_count * 100 / max },
        })
        .collect()
}
