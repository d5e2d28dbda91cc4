//! Queries over stylesheet source text.
//!
//! Nothing here builds a CSS object model: every query is a pattern search over the
//! raw text, so equivalent CSS written with a different syntax may not be found.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use tracing::trace;

lazy_static! {
    static ref MEDIA_WIDTH: Regex = Regex::new(r"(min|max)-width:\s*(\d+)px").unwrap();
    static ref GRID_REPEAT: Regex =
        Regex::new(r"grid-template-columns:\s*repeat\(\s*(\d+)").unwrap();
    static ref KEYFRAMES: Regex = Regex::new(r"@keyframes\s+([\w-]+)").unwrap();
    static ref BLOCK: Regex = Regex::new(r"([^{};]*)\{([^{}]*)\}").unwrap();
    static ref LINEAR_GRADIENT: Regex = Regex::new(r"linear-gradient\([^)]+\)").unwrap();
    static ref HEX_COLOR: Regex =
        Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{4}|[0-9a-fA-F]{3})\b").unwrap();
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum WidthBound {
    Min,
    Max,
}

impl fmt::Display for WidthBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthBound::Min => write!(f, "min-width"),
            WidthBound::Max => write!(f, "max-width"),
        }
    }
}

/// A `selector { declarations }` block without nested braces
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Block<'a> {
    pub selector: &'a str,
    pub body: &'a str,
}

impl<'a> Block<'a> {
    pub fn contains(&self, needle: &str) -> bool {
        self.body.contains(needle)
    }

    /// The remainder of the body after the first occurrence of `needle`
    pub fn after(&self, needle: &str) -> Option<&'a str> {
        self.body
            .find(needle)
            .map(|pos| &self.body[pos + needle.len()..])
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Stylesheet {
    text: String,
}

impl Stylesheet {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        trace!(bytes = text.len(), "Stylesheet text loaded");
        Self { text }
    }

    /// Literal search, e.g. `contains("520px")`
    pub fn contains(&self, literal: &str) -> bool {
        self.text.contains(literal)
    }

    /// Every `min-width: Npx` / `max-width: Npx` declaration, media queries included
    pub fn widths(&self) -> Vec<(WidthBound, u32)> {
        MEDIA_WIDTH
            .captures_iter(&self.text)
            .filter_map(|c| {
                let bound = match &c[1] {
                    "min" => WidthBound::Min,
                    _ => WidthBound::Max,
                };
                c[2].parse().ok().map(|px| (bound, px))
            })
            .collect()
    }

    pub fn has_width(&self, bound: WidthBound, px: u32) -> bool {
        self.widths().contains(&(bound, px))
    }

    /// Column counts of every `grid-template-columns: repeat(N, ...)`
    pub fn grid_repeats(&self) -> Vec<u32> {
        GRID_REPEAT
            .captures_iter(&self.text)
            .filter_map(|c| c[1].parse().ok())
            .collect()
    }

    pub fn keyframes(&self) -> Vec<&str> {
        KEYFRAMES
            .captures_iter(&self.text)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    pub fn blocks(&self) -> Vec<Block<'_>> {
        BLOCK
            .captures_iter(&self.text)
            .filter_map(|c| {
                Some(Block {
                    selector: c.get(1)?.as_str().trim(),
                    body: c.get(2)?.as_str(),
                })
            })
            .collect()
    }

    /// Blocks whose selector text ends with `selector`, so `header` also finds
    /// `.page header` and `.site-header`
    pub fn blocks_for(&self, selector: &str) -> Vec<Block<'_>> {
        self.blocks()
            .into_iter()
            .filter(|b| b.selector.ends_with(selector))
            .collect()
    }

    /// The first `linear-gradient(...)` expression in the sheet
    pub fn first_linear_gradient(&self) -> Option<&str> {
        LINEAR_GRADIENT.find(&self.text).map(|m| m.as_str())
    }
}

/// Hex color tokens (`#` followed by 3, 4 or 6 hex digits) in order of appearance
pub fn hex_colors(text: &str) -> Vec<&str> {
    HEX_COLOR.find_iter(text).map(|m| m.as_str()).collect()
}
