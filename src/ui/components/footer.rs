//! Footer component: pager, range summary, notification and prompts.

use crate::app::modes::{Notification, NotificationLevel};
use crate::ui::helpers::Painter;
use crate::ui::viewmodel::{FooterInfo, PagerInfo, PagerLink};
use std::fmt::Write;

/// Writes the pager line.
///
/// ```text
/// ‹ Prev   1  2 [3] 4  5   Next ›
/// ```
///
/// Disabled links are dimmed; the current page is bracketed.
pub fn render_pager(out: &mut String, pager: &PagerInfo, painter: &Painter<'_>) {
    let colors = &painter.theme.colors;

    write_link(out, "‹ Prev", pager.previous, painter);
    out.push_str("  ");

    for link in &pager.pages {
        if link.is_current {
            let _ = write!(
                out,
                " {}{}[{}]{}",
                painter.bold(),
                painter.fg(&colors.accent_fg),
                link.page,
                painter.reset()
            );
        } else {
            let _ = write!(out, " {}{} {}", painter.fg(&colors.text_normal), link.page, painter.reset());
        }
    }

    out.push_str("   ");
    write_link(out, "Next ›", pager.next, painter);
    out.push('\n');
}

fn write_link(out: &mut String, label: &str, link: PagerLink, painter: &Painter<'_>) {
    let colors = &painter.theme.colors;
    if link.enabled {
        let _ = write!(out, "{}{label}{}", painter.fg(&colors.text_normal), painter.reset());
    } else {
        let _ = write!(out, "{}{}{label}{}", painter.dim(), painter.fg(&colors.text_dim), painter.reset());
    }
}

pub fn render_footer(out: &mut String, footer: &FooterInfo, painter: &Painter<'_>) {
    if footer.summary.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "{}{}{}",
        painter.fg(&painter.theme.colors.text_dim),
        footer.summary,
        painter.reset()
    );
}

pub fn render_notification(out: &mut String, notification: &Notification, painter: &Painter<'_>) {
    let colors = &painter.theme.colors;
    let (icon, color) = match notification.level {
        NotificationLevel::Info => ("✓", &colors.notice_fg),
        NotificationLevel::Error => ("✗", &colors.error_fg),
    };
    let _ = writeln!(out, "{}{icon} {}{}", painter.fg(color), notification.message, painter.reset());
}

pub fn render_confirmation(out: &mut String, question: &str, painter: &Painter<'_>) {
    let _ = writeln!(
        out,
        "{}{}? {question} [y/N]{}",
        painter.bold(),
        painter.fg(&painter.theme.colors.accent_fg),
        painter.reset()
    );
}
