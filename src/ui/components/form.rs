//! Edit form overlay.

use crate::ui::helpers::{fit, Painter};
use crate::ui::viewmodel::FormInfo;
use std::fmt::Write;

/// Writes the form as a bordered block of `field: value` lines.
///
/// Required fields are marked with `*`; empty values show as `-`.
pub fn render_form(out: &mut String, form: &FormInfo, painter: &Painter<'_>, cols: usize) {
    let colors = &painter.theme.colors;
    let border = painter.fg(&colors.border);
    let inner_width = cols.saturating_sub(4);

    let label_width = form
        .fields
        .iter()
        .map(|(name, _)| name.chars().count() + 1)
        .max()
        .unwrap_or(0);

    let _ = writeln!(out, "{border}┌{}┐{}", "─".repeat(inner_width + 2), painter.reset());
    let _ = writeln!(
        out,
        "{border}│{} {}{}{border} │{}",
        painter.bold(),
        fit(&form.title, inner_width),
        painter.reset(),
        painter.reset()
    );

    for (name, value) in &form.fields {
        let marker = if form.required.contains(name) { "*" } else { "" };
        let label = format!("{name}{marker}");
        let value = if value.is_empty() { "-" } else { value.as_str() };
        let text = format!("{}  {value}", fit(&label, label_width));
        let _ = writeln!(
            out,
            "{border}│{} {}{border} │{}",
            painter.fg(&colors.text_normal),
            fit(&text, inner_width),
            painter.reset()
        );
    }

    let _ = writeln!(out, "{border}└{}┘{}", "─".repeat(inner_width + 2), painter.reset());
}
