//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the ticket list view and
//! the components it is drawn with.

pub mod components;
pub mod theme;
mod views;

pub use theme::Theme;
pub use views::{ListAction, ListView, PagingSummary};
