//! Reusable UI components.

mod status_bar;
mod table;

pub use status_bar::{render_header, render_status_bar, StatusMessage};
pub use table::{
    format_row, render_table, Column, VisibleRows, SELECTED_KEY, SELECTED_MARKER,
    TICKET_COLUMNS,
};
