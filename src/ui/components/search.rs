//! Search box and filter summary.

use crate::ui::helpers::Painter;
use crate::ui::viewmodel::{FilterInfo, SearchBarInfo};
use std::fmt::Write;

/// Horizontal margin for the search box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Writes a three-line bordered search box.
///
/// ```text
///   ┌──────────────────────────┐
///   │ Search: oak…             │
///   └──────────────────────────┘
/// ```
///
/// A trailing `…` marks typed text that has not been applied yet.
pub fn render_search_bar(out: &mut String, search: &SearchBarInfo, painter: &Painter<'_>, cols: usize) {
    let colors = &painter.theme.colors;
    let border = painter.fg(&colors.search_bar_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let inner_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2 + 2);

    let _ = writeln!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width), painter.reset());

    let marker = if search.pending { "…" } else { "" };
    let text = format!(" Search: {}{marker}", search.query);
    let padding = inner_width.saturating_sub(text.chars().count());
    let _ = writeln!(
        out,
        "{margin}{border}│{}{text}{}{border}│{}",
        painter.fg(&colors.text_normal),
        " ".repeat(padding),
        painter.reset()
    );

    let _ = writeln!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width), painter.reset());
}

/// Writes the active discrete filters on one dimmed line; nothing if the
/// listing has none.
pub fn render_filters(out: &mut String, filters: &[FilterInfo], painter: &Painter<'_>) {
    if filters.is_empty() {
        return;
    }

    let summary = filters
        .iter()
        .map(|f| format!("{}: {}", f.key, f.value))
        .collect::<Vec<_>>()
        .join("  ·  ");

    let _ = writeln!(
        out,
        "{}{}  {summary}{}",
        painter.dim(),
        painter.fg(&painter.theme.colors.text_dim),
        painter.reset()
    );
}
