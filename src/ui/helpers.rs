//! Shared rendering utilities.
//!
//! - [`Painter`]: theme-aware escape sequences that can be switched off for
//!   plain output (pipes, tests)
//! - [`highlight_ranges`]: fuzzy match positions coalesced into ranges
//! - [`fit`]: truncate or pad cell text to a fixed width
//!
//! All text helpers work on character indices, not bytes.

use crate::ui::theme::Theme;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt::Write;

/// Escape sequence source for the painter.
#[derive(Debug, Clone)]
pub struct Painter<'a> {
    pub theme: &'a Theme,
    /// Emit escape sequences at all.
    pub color: bool,
}

impl<'a> Painter<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme, color: bool) -> Self {
        Self { theme, color }
    }

    #[must_use]
    pub fn fg(&self, hex: &str) -> String {
        if self.color {
            Theme::fg(hex)
        } else {
            String::new()
        }
    }

    #[must_use]
    pub fn bg(&self, hex: &str) -> String {
        if self.color {
            Theme::bg(hex)
        } else {
            String::new()
        }
    }

    #[must_use]
    pub const fn bold(&self) -> &'static str {
        if self.color {
            Theme::bold()
        } else {
            ""
        }
    }

    #[must_use]
    pub const fn dim(&self) -> &'static str {
        if self.color {
            Theme::dim()
        } else {
            ""
        }
    }

    #[must_use]
    pub const fn reset(&self) -> &'static str {
        if self.color {
            Theme::reset()
        } else {
            ""
        }
    }

    /// Writes a full-width horizontal rule.
    pub fn rule(&self, out: &mut String, width: usize) {
        let _ = writeln!(
            out,
            "{}{}{}",
            self.fg(&self.theme.colors.border),
            "─".repeat(width),
            self.reset()
        );
    }

    /// Writes `text` with the given character ranges highlighted.
    pub fn highlighted(&self, out: &mut String, text: &str, ranges: &[(usize, usize)]) {
        if ranges.is_empty() || !self.color {
            out.push_str(text);
            return;
        }

        let chars: Vec<char> = text.chars().collect();
        let mut current_pos = 0;

        for &(start, end) in ranges {
            let start = start.min(chars.len());
            let end = end.min(chars.len());
            if start < current_pos || start >= end {
                continue;
            }

            out.extend(&chars[current_pos..start]);
            out.push_str(&self.fg(&self.theme.colors.match_highlight_fg));
            out.push_str(&self.bg(&self.theme.colors.match_highlight_bg));
            out.extend(&chars[start..end]);
            out.push_str(self.reset());
            out.push_str(&self.fg(&self.theme.colors.text_normal));

            current_pos = end;
        }

        out.extend(&chars[current_pos.min(chars.len())..]);
    }
}

/// Fuzzy-matches `query` against `text` and coalesces the matched character
/// indices into `(start, end)` ranges with exclusive ends.
///
/// Returns no ranges for a blank query or no match.
#[must_use]
pub fn highlight_ranges(matcher: &SkimMatcherV2, text: &str, query: &str) -> Vec<(usize, usize)> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return Vec::new();
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

/// Truncates `text` to `width` characters (with a trailing `…`) or pads it
/// with spaces.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len > width {
        if width == 0 {
            return String::new();
        }
        let mut truncated: String = text.chars().take(width - 1).collect();
        truncated.push('…');
        truncated
    } else {
        format!("{text}{}", " ".repeat(width - len))
    }
}

/// Centers `text` within `width` columns.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let padding = width.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(padding))
}
