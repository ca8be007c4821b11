//! Header component: listing title, count badge and sort.

use crate::ui::helpers::{center, Painter};
use crate::ui::viewmodel::HeaderInfo;
use std::fmt::Write;

/// Writes the centered title line.
///
/// ```text
///            Products (41) · createdAt desc
/// ```
///
/// The count badge is left out when the header carries no count.
pub fn render_header(out: &mut String, header: &HeaderInfo, painter: &Painter<'_>, cols: usize) {
    let title = match header.count {
        Some(count) => format!("{} ({count}) · {}", header.title, header.sort),
        None => format!("{} · {}", header.title, header.sort),
    };
    let line = center(&title, cols);
    let padding = cols.saturating_sub(line.chars().count());

    let colors = &painter.theme.colors;
    out.push_str(painter.bold());
    out.push_str(&painter.fg(&colors.header_fg));
    if let Some(bg) = &colors.header_bg {
        out.push_str(&painter.bg(bg));
    }
    let _ = write!(out, "{line}{}", " ".repeat(padding));
    out.push_str(painter.reset());
    out.push('\n');
}
