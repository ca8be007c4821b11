//! Rendering layer.
//!
//! ```text
//! ListState → render → ListViewModel → paint → themed text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: plain data describing one list view
//! - [`renderer`]: the pure [`render`] function and [`paint`]
//! - [`components`]: painters for each part of the view
//! - [`helpers`]: escape sequences, fuzzy highlighting, cell fitting
//! - [`theme`]: color schemes loaded from TOML

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{paint, pager, render, wishlist_state};
pub use theme::Theme;
pub use viewmodel::{
    DisplayRow, EmptyState, ErrorState, FooterInfo, HeaderInfo, ListBody, ListViewModel,
    PagerInfo, SearchBarInfo,
};
