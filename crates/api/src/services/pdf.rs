//! HTML to PDF rendering.
//!
//! The HTML is reduced to a sequence of text blocks (headings, paragraphs,
//! list items, table rows), word-wrapped and laid out top to bottom on pages
//! using the built-in Helvetica faces. Layout is flow-only: CSS, images and
//! positioning are ignored.

use lazy_static::lazy_static;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};
use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::config::PdfConfig;

const MM_PER_PT: f32 = 0.352_778;
const LINE_SPACING: f32 = 1.4;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// Errors that can occur while rendering a PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Failed to write PDF: {0}")]
    Write(String),

    #[error("PDF rendering task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading(u8),
    Paragraph,
    ListItem,
}

/// A run of text rendered as one wrapped block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub kind: BlockKind,
    pub text: String,
}

lazy_static! {
    static ref SKIPPED_CONTENT: Regex =
        Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<head\b[^>]*>.*?</head\s*>")
            .expect("valid skip regex");
    // Quoted attribute values may contain '>'.
    static ref TAG: Regex =
        Regex::new(r#"(?s)<(/?)([a-zA-Z][a-zA-Z0-9]*)(?:[^>"']|"[^"]*"|'[^']*')*>"#)
            .expect("valid tag regex");
    static ref NUMERIC_ENTITY: Regex =
        Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("valid entity regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid whitespace regex");
}

/// Renders HTML documents to PDF bytes.
#[derive(Debug, Clone)]
pub struct PdfGenerator {
    config: PdfConfig,
}

impl PdfGenerator {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Renders `html` into a complete PDF document.
    pub fn generate_pdf(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let blocks = extract_blocks(html);
        let cfg = &self.config;
        let width = Mm(cfg.page_width_mm);
        let height = Mm(cfg.page_height_mm);
        let top = cfg.page_height_mm - cfg.margin_mm;

        let (doc, page, layer) = PdfDocument::new(cfg.title.clone(), width, height, "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PdfError::Font(format!("{e:?}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PdfError::Font(format!("{e:?}")))?;

        let mut current = doc.get_page(page).get_layer(layer);
        let mut cursor = top;
        let mut pages = 1;

        for block in &blocks {
            let size = self.font_size(block.kind);
            let line_height = size * MM_PER_PT * LINE_SPACING;
            let font: &IndirectFontRef = match block.kind {
                BlockKind::Heading(_) => &bold,
                _ => &regular,
            };
            let text = match block.kind {
                BlockKind::ListItem => format!("- {}", block.text),
                _ => block.text.clone(),
            };

            for line in wrap_text(&text, self.chars_per_line(size)) {
                if cursor - line_height < cfg.margin_mm {
                    let (next_page, next_layer) = doc.add_page(width, height, "Layer 1");
                    current = doc.get_page(next_page).get_layer(next_layer);
                    cursor = top;
                    pages += 1;
                }
                cursor -= line_height;
                current.use_text(line, size, Mm(cfg.margin_mm), Mm(cursor), font);
            }
            cursor -= line_height * 0.5;
        }
        drop(current);

        let bytes = doc
            .save_to_bytes()
            .map_err(|e| PdfError::Write(format!("{e:?}")))?;

        debug!(
            blocks = blocks.len(),
            pages = pages,
            bytes = bytes.len(),
            "Rendered PDF"
        );

        Ok(bytes)
    }

    /// Renders on the blocking pool so large documents don't stall the runtime.
    pub async fn generate_pdf_async(&self, html: String) -> Result<Vec<u8>, PdfError> {
        let generator = self.clone();
        tokio::task::spawn_blocking(move || generator.generate_pdf(&html))
            .await
            .map_err(|e| PdfError::Task(e.to_string()))?
    }

    fn font_size(&self, kind: BlockKind) -> f32 {
        let base = self.config.font_size;
        match kind {
            BlockKind::Heading(1) => base * 1.8,
            BlockKind::Heading(2) => base * 1.5,
            BlockKind::Heading(_) => base * 1.25,
            BlockKind::Paragraph | BlockKind::ListItem => base,
        }
    }

    fn chars_per_line(&self, size: f32) -> usize {
        let printable = self.config.page_width_mm - 2.0 * self.config.margin_mm;
        let glyph = size * MM_PER_PT * AVG_GLYPH_WIDTH;
        ((printable / glyph).floor() as usize).max(1)
    }
}

/// Reduces HTML to text blocks in document order.
pub fn extract_blocks(html: &str) -> Vec<TextBlock> {
    let cleaned = SKIPPED_CONTENT.replace_all(html, " ");
    let mut builder = BlockBuilder::default();
    let mut last = 0;

    for caps in TAG.captures_iter(&cleaned) {
        let Some(whole) = caps.get(0) else { continue };
        builder.push_text(&cleaned[last..whole.start()]);
        last = whole.end();

        let closing = &caps[1] == "/";
        let name = caps[2].to_ascii_lowercase();
        match name.as_str() {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                builder.flush();
                if !closing {
                    let level = name[1..].parse().unwrap_or(6);
                    builder.kind = Some(BlockKind::Heading(level));
                }
            }
            "li" => {
                builder.flush();
                if !closing {
                    builder.kind = Some(BlockKind::ListItem);
                }
            }
            "td" | "th" if closing => builder.push_text(" "),
            "p" | "div" | "br" | "tr" | "table" | "ul" | "ol" | "section" | "article"
            | "header" | "footer" | "blockquote" | "pre" | "hr" | "body" | "title" => {
                builder.flush()
            }
            _ => {}
        }
    }
    builder.push_text(&cleaned[last..]);
    builder.flush();
    builder.blocks
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<TextBlock>,
    text: String,
    kind: Option<BlockKind>,
}

impl BlockBuilder {
    fn push_text(&mut self, raw: &str) {
        self.text.push_str(raw);
    }

    fn flush(&mut self) {
        let decoded = decode_entities(&self.text);
        let collapsed = WHITESPACE.replace_all(&decoded, " ");
        let text = to_printable(collapsed.trim());
        if !text.is_empty() {
            self.blocks.push(TextBlock {
                kind: self.kind.unwrap_or(BlockKind::Paragraph),
                text,
            });
        }
        self.text.clear();
        self.kind = None;
    }
}

fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    // Ampersand last so "&amp;lt;" stays literal.
    numeric.replace("&amp;", "&")
}

/// Built-in PDF fonts only cover Latin-1 reliably; anything else becomes '?'.
fn to_printable(text: &str) -> String {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) || ('\u{a0}'..='\u{ff}').contains(&c) { c } else { '?' })
        .collect()
}

/// Greedy word wrap; words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PdfGenerator {
        PdfGenerator::new(PdfConfig::default())
    }

    #[test]
    fn test_generate_simple_pdf() {
        let bytes = generator()
            .generate_pdf("<html><body><p>Hi</p></body></html>")
            .unwrap();
        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_generate_empty_document() {
        let bytes = generator().generate_pdf("").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_generate_multi_page_document() {
        let paragraph = "<p>Patient reports intermittent headaches over the past two weeks.</p>";
        let html = format!("<html><body><h1>Visit notes</h1>{}</body></html>", paragraph.repeat(200));
        let bytes = generator().generate_pdf(&html).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.len() > 1000);
    }

    #[tokio::test]
    async fn test_generate_pdf_async() {
        let bytes = generator()
            .generate_pdf_async("<p>Async</p>".to_string())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_extract_blocks_structure() {
        let html = r#"
            <html>
              <head><title>Ignored</title><style>p { color: red; }</style></head>
              <body>
                <h2>Allergies</h2>
                <ul><li>Penicillin</li><li>Peanuts</li></ul>
                <p>Reviewed   with
                   patient.</p>
                <script>alert("x")</script>
              </body>
            </html>"#;

        let blocks = extract_blocks(html);

        assert_eq!(
            blocks,
            vec![
                TextBlock { kind: BlockKind::Heading(2), text: "Allergies".into() },
                TextBlock { kind: BlockKind::ListItem, text: "Penicillin".into() },
                TextBlock { kind: BlockKind::ListItem, text: "Peanuts".into() },
                TextBlock { kind: BlockKind::Paragraph, text: "Reviewed with patient.".into() },
            ]
        );
    }

    #[test]
    fn test_extract_blocks_inline_tags_and_tables() {
        let html = "<p>BP <b>120/80</b> mmHg<br>Pulse 72</p>\
                    <table><tr><th>Test</th><th>Result</th></tr><tr><td>A1C</td><td>6.1</td></tr></table>";

        let texts: Vec<String> = extract_blocks(html).into_iter().map(|b| b.text).collect();

        assert_eq!(texts, vec!["BP 120/80 mmHg", "Pulse 72", "Test Result", "A1C 6.1"]);
    }

    #[test]
    fn test_extract_blocks_quoted_gt_in_attribute() {
        let blocks = extract_blocks(r#"<p title="a>b">Hi</p><div data-x='1 > 0' class=note>BP stable</div>"#);

        assert_eq!(
            blocks,
            vec![
                TextBlock { kind: BlockKind::Paragraph, text: "Hi".into() },
                TextBlock { kind: BlockKind::Paragraph, text: "BP stable".into() },
            ]
        );
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;5&gt;"), "<5>");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_to_printable() {
        assert_eq!(to_printable("café"), "café");
        assert_eq!(to_printable("日本"), "??");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_chars_per_line() {
        let gen = generator();
        // 170mm printable at 11pt
        assert_eq!(gen.chars_per_line(11.0), 87);
        assert!(gen.chars_per_line(gen.font_size(BlockKind::Heading(1))) < 87);
    }
}
