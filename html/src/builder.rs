use tracing::{debug, span, Level};

use super::entities::decode;
use super::parsing::{tokenize, Token};
use super::{DOMContent, DOMElement, Document};

/// Elements which can never have contents
static VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Opening any of these closes a `p` that is still open
static CLOSES_P: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "figure", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

static LIST: &[&str] = &["ul", "ol", "menu"];

/// Elements where whitespace between tags is never content
static NO_TEXT: &[&str] = &["html", "head"];

/// Parse markup into a [`Document`]. Malformed input produces a best-effort tree rather
/// than an error.
pub fn document(input: &str) -> Document {
    let span = span!(Level::DEBUG, "Materializing document", bytes = input.len());
    let _enter = span.enter();
    let mut builder = TreeBuilder::default();
    for token in tokenize(input) {
        builder.push(token);
    }
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    /// Finished top-level nodes
    root: Vec<DOMContent>,
    /// Elements still waiting for their close tag, innermost last
    open: Vec<DOMElement>,
}

impl TreeBuilder {
    fn push(&mut self, token: Token) {
        match token {
            Token::Declaration(_) | Token::Comment(_) => {}
            Token::Text(text) => {
                if !text.trim().is_empty() {
                    self.append(decode(text).into_owned().into());
                } else if self.keeps_whitespace() {
                    // Separates inline siblings, e.g. `<span>a</span> <span>b</span>`
                    self.append(" ".into());
                }
            }
            Token::RawText(text) => {
                if !text.trim().is_empty() {
                    self.append(text.into());
                }
            }
            Token::Open {
                name,
                attributes,
                self_closing,
            } => {
                self.close_implied(&name);
                let void = self_closing || VOID.contains(&name.as_str());
                let elt = DOMElement::new(name, Some(attributes), vec![]);
                if void {
                    self.append(elt.into());
                } else {
                    self.open.push(elt);
                }
            }
            Token::Close(name) => self.close(&name),
        }
    }

    fn append(&mut self, content: DOMContent) {
        match self.open.last_mut() {
            Some(parent) => parent.contents.push(content),
            None => self.root.push(content),
        }
    }

    /// Whether a whitespace-only run is kept at the current insertion point. Runs
    /// outside any element, directly in `html` or `head`, or following other text
    /// carry no content.
    fn keeps_whitespace(&self) -> bool {
        match self.open.last() {
            None => false,
            Some(parent) if NO_TEXT.contains(&parent.name.as_str()) => false,
            Some(parent) => !matches!(parent.contents.last(), Some(DOMContent::Text(_))),
        }
    }

    /// Close the innermost element
    fn pop(&mut self) {
        if let Some(elt) = self.open.pop() {
            self.append(elt.into());
        }
    }

    fn close(&mut self, name: &str) {
        if VOID.contains(&name) {
            return;
        }
        match self.open.iter().rposition(|e| e.name == name) {
            Some(pos) => {
                if pos + 1 < self.open.len() {
                    debug!(tag = name, unclosed = self.open.len() - pos - 1, "Closing unclosed elements");
                }
                while self.open.len() > pos {
                    self.pop();
                }
            }
            None => debug!(tag = name, "Ignoring close tag with no open element"),
        }
    }

    /// Close elements which cannot contain the element being opened
    fn close_implied(&mut self, name: &str) {
        if name == "li" {
            for pos in (0..self.open.len()).rev() {
                let open = self.open[pos].name.as_str();
                if LIST.contains(&open) {
                    break;
                }
                if open == "li" {
                    while self.open.len() > pos {
                        self.pop();
                    }
                    break;
                }
            }
        } else if CLOSES_P.contains(&name) && self.open.last().map_or(false, |e| e.name == "p") {
            self.pop();
        }
    }

    fn finish(mut self) -> Document {
        if !self.open.is_empty() {
            debug!(unclosed = self.open.len(), "Closing elements at end of input");
        }
        while !self.open.is_empty() {
            self.pop();
        }
        Document::from_contents(self.root)
    }
}
