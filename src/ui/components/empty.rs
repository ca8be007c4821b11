//! Loading, empty and error blocks.
//!
//! Each state gets its own unmistakable block so that "no results" is never
//! confused with "failed to load" or "still loading".

use crate::ui::helpers::{center, fit, Painter};
use crate::ui::viewmodel::{EmptyState, ErrorState};
use std::fmt::Write;

pub fn render_loading(out: &mut String, painter: &Painter<'_>, cols: usize) {
    let _ = writeln!(
        out,
        "\n{}{}{}{}\n",
        painter.dim(),
        painter.fg(&painter.theme.colors.text_dim),
        center("Loading…", cols),
        painter.reset()
    );
}

/// Writes the centered empty message and its dimmed subtitle.
pub fn render_empty_state(out: &mut String, empty: &EmptyState, painter: &Painter<'_>, cols: usize) {
    let colors = &painter.theme.colors;

    let _ = writeln!(
        out,
        "\n{}{}{}",
        painter.fg(&colors.empty_state_fg),
        center(&empty.message, cols),
        painter.reset()
    );
    if !empty.subtitle.is_empty() {
        let _ = writeln!(
            out,
            "{}{}{}{}",
            painter.dim(),
            painter.fg(&colors.text_dim),
            center(&empty.subtitle, cols),
            painter.reset()
        );
    }
    out.push('\n');
}

/// Writes the load failure block: bold title, then the server's message.
pub fn render_error_state(out: &mut String, error: &ErrorState, painter: &Painter<'_>, cols: usize) {
    let colors = &painter.theme.colors;

    let _ = writeln!(
        out,
        "\n{}{}✗ {}{}",
        painter.bold(),
        painter.fg(&colors.error_fg),
        error.title,
        painter.reset()
    );
    let _ = writeln!(
        out,
        "{}  {}{}\n",
        painter.fg(&colors.text_normal),
        fit(&error.message, cols.saturating_sub(2)).trim_end(),
        painter.reset()
    );
}
