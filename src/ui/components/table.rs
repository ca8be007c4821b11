//! Table component: column headers and rows.

use crate::ui::helpers::{fit, Painter};
use crate::ui::viewmodel::{ColumnInfo, DisplayRow};
use std::fmt::Write;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Width of the wishlist marker column.
const MARKER_WIDTH: usize = 2;

/// Writes the bold column header line.
pub fn render_table_headers(
    out: &mut String,
    columns: &[ColumnInfo],
    with_marker: bool,
    painter: &Painter<'_>,
) {
    out.push_str(painter.bold());
    out.push_str(&painter.fg(&painter.theme.colors.text_dim));
    if with_marker {
        out.push_str(&" ".repeat(MARKER_WIDTH));
    }
    let headers = columns
        .iter()
        .map(|c| fit(&c.header, c.width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(headers.trim_end());
    out.push_str(painter.reset());
    out.push('\n');
}

/// Writes one line per row.
pub fn render_table_rows(out: &mut String, rows: &[DisplayRow], columns: &[ColumnInfo], painter: &Painter<'_>) {
    for row in rows {
        render_table_row(out, row, columns, painter);
    }
}

/// Writes one row.
///
/// The first cell carries the search highlights; every cell is truncated
/// or padded to its column width. Wishlist rows start with `♥` or `♡`.
fn render_table_row(out: &mut String, row: &DisplayRow, columns: &[ColumnInfo], painter: &Painter<'_>) {
    let colors = &painter.theme.colors;

    if let Some(wishlisted) = row.is_wishlisted {
        let (marker, color) = if wishlisted {
            ("♥", &colors.accent_fg)
        } else {
            ("♡", &colors.text_dim)
        };
        let _ = write!(out, "{}{marker}{} ", painter.fg(color), painter.reset());
    }

    out.push_str(&painter.fg(&colors.text_normal));

    let mut line = String::new();
    for (index, (column, cell)) in columns.iter().zip(&row.cells).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        let fitted = fit(cell, column.width);
        if index == 0 {
            painter.highlighted(&mut line, &fitted, &row.highlight_ranges);
        } else {
            line.push_str(&fitted);
        }
    }

    out.push_str(line.trim_end());
    out.push_str(painter.reset());
    out.push('\n');
}
