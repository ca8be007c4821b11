//! Composable painters for each part of a list view.
//!
//! Every component appends to a `String`; nothing writes to the terminal
//! directly.
//!
//! # Components
//!
//! - [`header`]: title, count badge and sort
//! - [`search`]: search box and active filters
//! - [`table`]: column headers and rows
//! - [`empty`]: loading, empty and error blocks
//! - [`footer`]: pager, range summary, notifications and prompts
//! - [`form`]: edit form overlay
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Search box - 3 lines]
//! [Filters]
//! [Table headers]
//! [Rows | Loading | Empty | Error]
//! [Border]
//! [Pager]
//! [Summary]
//! [Notification]
//! [Form]
//! [Confirmation]
//! ```

mod empty;
mod footer;
mod form;
mod header;
mod search;
mod table;

use crate::ui::helpers::Painter;
use crate::ui::viewmodel::{ListBody, ListViewModel};

/// Paints a whole list view `cols` columns wide.
pub fn render_list(vm: &ListViewModel, painter: &Painter<'_>, cols: usize) -> String {
    let mut out = String::new();

    header::render_header(&mut out, &vm.header, painter, cols);
    painter.rule(&mut out, cols);
    search::render_search_bar(&mut out, &vm.search_bar, painter, cols);
    search::render_filters(&mut out, &vm.filters, painter);

    match &vm.body {
        ListBody::Loading => empty::render_loading(&mut out, painter, cols),
        ListBody::Rows(rows) => {
            let with_marker = rows.iter().any(|r| r.is_wishlisted.is_some());
            table::render_table_headers(&mut out, &vm.columns, with_marker, painter);
            table::render_table_rows(&mut out, rows, &vm.columns, painter);
        }
        ListBody::Empty(empty) => empty::render_empty_state(&mut out, empty, painter, cols),
        ListBody::Error(error) => empty::render_error_state(&mut out, error, painter, cols),
    }

    painter.rule(&mut out, cols);

    if let Some(pager) = &vm.pager {
        footer::render_pager(&mut out, pager, painter);
    }
    footer::render_footer(&mut out, &vm.footer, painter);

    if let Some(notification) = &vm.notification {
        footer::render_notification(&mut out, notification, painter);
    }
    if let Some(form) = &vm.form {
        form::render_form(&mut out, form, painter, cols);
    }
    if let Some(question) = &vm.confirmation {
        footer::render_confirmation(&mut out, question, painter);
    }

    out
}
