//! Ticket table schema and rendering.
//!
//! The table is described by a static, ordered list of [`Column`]
//! descriptors. Each descriptor carries a pure formatter that turns a field
//! value (present or absent) into display text and never fails.


use ratatui::{
    layout::{Alignment, Constraint, Rect},
    text::Line,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::source::Record;
use crate::ui::theme::Theme;

/// Key of the pseudo-column showing the selection marker.
pub const SELECTED_KEY: &str = "_selected";

/// Glyph drawn in the selection column of the highlighted row.
pub const SELECTED_MARKER: &str = ">";

/// How a column claims horizontal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSizing {
    /// Exactly this many cells.
    Fixed(u16),
    /// A share of the remaining width, proportional to the weight.
    Weight(u16),
}

impl ColumnSizing {
    fn constraint(self) -> Constraint {
        match self {
            ColumnSizing::Fixed(width) => Constraint::Length(width),
            ColumnSizing::Weight(weight) => Constraint::Fill(weight),
        }
    }
}

/// Turns a field value into display text.
pub type Formatter = fn(Option<&str>) -> String;

/// A column descriptor.
#[derive(Clone, Copy)]
pub struct Column {
    /// Record field shown in this column.
    pub key: &'static str,
    /// Header text; `None` uses the title-cased key.
    pub title: Option<&'static str>,
    /// Fixed or weighted width.
    pub sizing: ColumnSizing,
    /// Alignment of header and cells.
    pub align: Alignment,
    /// Renders the field value; absent fields arrive as `None`.
    pub formatter: Formatter,
}

impl Column {
    /// A weight-1, left-aligned column printing the raw value.
    pub const fn new(key: &'static str) -> Self {
        Self {
            key,
            title: None,
            sizing: ColumnSizing::Weight(1),
            align: Alignment::Left,
            formatter: plain,
        }
    }

    pub const fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub const fn sizing(mut self, sizing: ColumnSizing) -> Self {
        self.sizing = sizing;
        self
    }

    pub const fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub const fn formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// The header text for this column.
    pub fn header(&self) -> String {
        match self.title {
            Some(title) => title.to_string(),
            None if self.key == SELECTED_KEY => String::new(),
            None => title_case(self.key),
        }
    }

    /// Format this column's cell for a record.
    pub fn format<R: Record>(&self, record: &R) -> String {
        let value = record.field(self.key);
        (self.formatter)(value.as_deref())
    }
}

/// The ticket table schema, in display order.
pub const TICKET_COLUMNS: &[Column] = &[
    Column::new(SELECTED_KEY).sizing(ColumnSizing::Fixed(1)),
    Column::new("id")
        .title("Ticket #")
        .sizing(ColumnSizing::Fixed(9))
        .align(Alignment::Right)
        .formatter(padded),
    Column::new("subject").sizing(ColumnSizing::Weight(2)),
    Column::new("type").formatter(ticket_type),
    Column::new("priority").formatter(or_dash),
];

/// Print the value as-is, or nothing when absent.
pub fn plain(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

/// Surround the value with a space on each side.
pub fn padded(value: Option<&str>) -> String {
    format!(" {} ", value.unwrap_or_default())
}

/// Title-cased ticket type; untyped tickets are plain "Ticket".
pub fn ticket_type(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => title_case(v),
        _ => "Ticket".to_string(),
    }
}

/// The value, or "-" when absent or empty.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
///
/// Any non-alphabetic character starts a new word, so `on_hold` becomes
/// `On_Hold`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Format one record through every column.
///
/// The selection column is always blank here; the marker is applied by the
/// list to the highlighted row.
pub fn format_row<R: Record>(columns: &[Column], record: &R) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            if column.key == SELECTED_KEY {
                String::new()
            } else {
                column.format(record)
            }
        })
        .collect()
}

/// Formatted rows ready for drawing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleRows {
    /// One entry per visible record, one string per column.
    pub rows: Vec<Vec<String>>,
    /// Index into `rows` of the highlighted row.
    pub selected: Option<usize>,
}

impl VisibleRows {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Draw the ticket table: a header row plus the visible rows.
///
/// Cells longer than their column are clipped by the terminal backend.
pub fn render_table(
    frame: &mut Frame,
    area: Rect,
    columns: &[Column],
    visible: &VisibleRows,
    theme: &Theme,
) {
    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(Line::from(c.header()).alignment(c.align))),
    )
    .style(theme.column_header);

    let rows = visible.rows.iter().enumerate().map(|(index, cells)| {
        let style = if visible.selected == Some(index) {
            theme.selected
        } else {
            theme.column
        };
        Row::new(
            cells
                .iter()
                .zip(columns)
                .map(|(text, c)| Cell::from(Line::from(text.clone()).alignment(c.align))),
        )
        .style(style)
    });

    let widths: Vec<Constraint> = columns.iter().map(|c| c.sizing.constraint()).collect();
    let table = Table::new(rows, widths).header(header).column_spacing(1);

    frame.render_widget(table, area);
}
