use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static SINGLE_LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([^\]]*)\]\(([^)]+)\)$").unwrap());
static INLINE_LINKS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(?:!doctype|html|head|body|div|p|a|span|table|tr|td|ul|ol|li|h[1-6]|br|section|article|main|nav)\b")
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Link { text: String, url: String },
    Text(String),
    Empty,
}

/// Tags whose content never reaches a block.
const SKIPPED_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "svg", "iframe",
];

/// Tags that end the current text block.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "footer", "header", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody",
    "td", "th", "thead", "tr", "ul", "caption", "time", "body", "html",
];

/// Split raw page content into blocks. HTML is walked as a DOM, anything else
/// is classified line by line.
pub fn classify(content: &str) -> Vec<Block> {
    if HTML_TAG_RE.is_match(content) {
        classify_html(content)
    } else {
        classify_lines(content)
    }
}

/// Line-oriented classification for plain text and markdown.
pub fn classify_lines(text: &str) -> Vec<Block> {
    if text.trim().is_empty() {
        return vec![Block::Empty];
    }

    let mut blocks = Vec::new();
    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() {
            blocks.push(Block::Empty);
            continue;
        }

        // ── Heading: ## text ──
        if let Some(caps) = HEADING_RE.captures(line) {
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                text: collapse_whitespace(&caps[2]),
            });
            continue;
        }

        // ── Single link on the line: [text](url) ──
        if let Some(caps) = SINGLE_LINK_RE.captures(line) {
            blocks.push(Block::Link {
                text: collapse_whitespace(&caps[1]),
                url: caps[2].trim().to_string(),
            });
            continue;
        }

        // ── Links inside prose: keep the links, then the remaining words ──
        if line.contains("](") && line.contains('[') {
            for caps in INLINE_LINKS_RE.captures_iter(line) {
                blocks.push(Block::Link {
                    text: collapse_whitespace(&caps[1]),
                    url: caps[2].trim().to_string(),
                });
            }
            let rest = collapse_whitespace(&INLINE_LINKS_RE.replace_all(line, " "));
            if !rest.is_empty() {
                blocks.push(Block::Text(rest));
            }
            continue;
        }

        blocks.push(Block::Text(collapse_whitespace(line)));
    }

    blocks
}

/// DOM classification: anchors become links, block-level elements and `<br>`
/// delimit text.
pub fn classify_html(html: &str) -> Vec<Block> {
    let document = Html::parse_document(html);
    let mut walker = Walker::default();
    walker.walk(document.root_element());
    walker.flush();
    walker.blocks
}

/// Pending work for the DOM walk. Nesting depth lives on the heap, not the
/// call stack.
enum Step<'a> {
    Open(ElementRef<'a>),
    Text(&'a str),
    Close { heading: Option<u8>, is_block: bool },
}

#[derive(Default)]
struct Walker {
    blocks: Vec<Block>,
    buf: String,
}

impl Walker {
    fn walk(&mut self, root: ElementRef) {
        let mut stack = vec![Step::Open(root)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(element) => self.open(element, &mut stack),
                Step::Text(text) => {
                    self.buf.push(' ');
                    self.buf.push_str(text);
                }
                Step::Close { heading, is_block } => self.close(heading, is_block),
            }
        }
    }

    fn open<'a>(&mut self, element: ElementRef<'a>, stack: &mut Vec<Step<'a>>) {
        let name = element.value().name();
        if SKIPPED_TAGS.contains(&name) {
            return;
        }

        if name == "a" {
            self.flush();
            let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
            match element.value().attr("href") {
                Some(href) => self.blocks.push(Block::Link {
                    text,
                    url: href.trim().to_string(),
                }),
                None if !text.is_empty() => self.blocks.push(Block::Text(text)),
                None => {}
            }
            return;
        }

        if name == "br" {
            self.flush();
            return;
        }

        let heading = heading_level(name);
        let is_block = heading.is_some() || BLOCK_TAGS.contains(&name);
        if is_block {
            self.flush();
        }

        stack.push(Step::Close { heading, is_block });
        // Reversed so children pop in document order.
        for child in element.children().rev() {
            match child.value() {
                Node::Text(text) => stack.push(Step::Text(&**text)),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        stack.push(Step::Open(child));
                    }
                }
                _ => {}
            }
        }
    }

    fn close(&mut self, heading: Option<u8>, is_block: bool) {
        match heading {
            Some(level) => {
                let text = collapse_whitespace(&std::mem::take(&mut self.buf));
                if !text.is_empty() {
                    self.blocks.push(Block::Heading { level, text });
                }
            }
            None if is_block => self.flush(),
            None => {}
        }
    }

    fn flush(&mut self) {
        let text = collapse_whitespace(&std::mem::take(&mut self.buf));
        if !text.is_empty() {
            self.blocks.push(Block::Text(text));
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
