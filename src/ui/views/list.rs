//! Ticket list view.
//!
//! A virtualized table over an unbounded record source. The view owns the
//! visible window: an `offset` into the cached records, the `highlighted`
//! row within the window, and the viewport height. Key presses and resizes
//! are pure transitions of that state; after each one the view re-reads the
//! visible slice from the [`PrefetchCache`] and formats it for drawing.
//!
//! Movement first moves the highlight within the current page; only the part
//! of a movement that would push the highlight past the viewport edge scrolls
//! the offset. Page keys use the same rule with a page-sized delta.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use tracing::debug;

use crate::cache::PrefetchCache;
use crate::config::Settings;
use crate::events::{KeyBindings, ListKey};
use crate::source::{Record, RecordSource};
use crate::ui::components::{
    format_row, render_table, Column, VisibleRows, SELECTED_KEY, SELECTED_MARKER, TICKET_COLUMNS,
};
use crate::ui::theme::Theme;

/// Identifier type of the records a source produces.
pub type RecordId<S> = <<S as RecordSource>::Record as Record>::Id;

/// Rows taken by the column titles.
const HEADER_SIZE: u16 = 1;

/// Rows taken below the table body.
const FOOTER_SIZE: u16 = 0;

/// Action returned from the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction<I> {
    /// Open the record with this identifier.
    Open(I),
}

/// Position of the visible window within the cached records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingSummary {
    /// 1-based position of the first visible record, 0 when nothing is visible.
    pub first: usize,
    /// 1-based position of the last visible record.
    pub last: usize,
    /// Records cached so far.
    pub cached: usize,
    /// Whether the cached count is the final total.
    pub exhausted: bool,
}

impl PagingSummary {
    /// Format as `X - Y of Z`, with `Z+` while more records may follow.
    pub fn text(&self) -> String {
        if self.last == 0 {
            return if self.exhausted {
                "No tickets".to_string()
            } else {
                "Loading tickets...".to_string()
            };
        }
        let more = if self.exhausted { "" } else { "+" };
        format!("{} - {} of {}{}", self.first, self.last, self.cached, more)
    }
}

/// The ticket list view.
pub struct ListView<S: RecordSource> {
    /// Records pulled from the source so far.
    cache: PrefetchCache<S>,
    /// Table schema.
    columns: &'static [Column],
    /// Key token resolution.
    bindings: KeyBindings,
    /// Multiplier applied to the visible row count for page keys.
    page_speed: f32,
    /// Cache index of the first visible record.
    offset: usize,
    /// Index of the highlighted row within the visible window.
    highlighted: usize,
    /// Height of the list area, including the column titles.
    height: u16,
    /// Formatted rows from the last refresh.
    visible: VisibleRows,
}

impl<S: RecordSource> ListView<S> {
    /// Create a list over `source` showing the ticket columns.
    pub fn new(source: S, settings: &Settings) -> Self {
        Self::with_columns(source, TICKET_COLUMNS, settings)
    }

    /// Create a list with a custom column schema.
    pub fn with_columns(source: S, columns: &'static [Column], settings: &Settings) -> Self {
        Self {
            cache: PrefetchCache::new(source),
            columns,
            bindings: KeyBindings::new(settings.vim_mode),
            page_speed: settings.page_speed,
            offset: 0,
            highlighted: 0,
            height: 0,
            visible: VisibleRows::default(),
        }
    }

    /// Rows taken up by the header and footer.
    pub fn nonbody_overhead(&self) -> u16 {
        HEADER_SIZE + FOOTER_SIZE
    }

    /// Number of record rows that fit in `height`.
    pub fn visible_capacity(&self, height: u16) -> usize {
        usize::from(height.saturating_sub(self.nonbody_overhead()))
    }

    /// Move the highlight by `delta`, scrolling whatever does not fit.
    ///
    /// The highlight moves until it reaches the edge of the viewport; the
    /// remaining movement shifts the offset, bounded by the cached records.
    /// With `delta == 0` this only re-clamps against a new height.
    pub fn move_by(&mut self, height: u16, delta: isize) {
        let capacity = self.visible_capacity(height) as isize;
        let last_row = (capacity - 1).max(0);
        let highlighted = self.highlighted as isize;

        let target = highlighted.saturating_add(delta).clamp(0, last_row);
        let remainder = delta.saturating_sub(target - highlighted);
        self.highlighted = target as usize;

        let last_offset = (self.cache.len() as isize - 1).max(0);
        self.offset = (self.offset as isize)
            .saturating_add(remainder)
            .clamp(0, last_offset) as usize;
    }

    /// Re-clamp the window for `height` and refresh the visible rows.
    ///
    /// Called after every event, including pure resizes: a smaller viewport
    /// can invalidate the current highlight.
    pub fn reflow(&mut self, height: u16) -> Result<(), S::Error> {
        self.height = height;
        self.move_by(height, 0);
        self.refresh(height)
    }

    /// Handle a resize of the list area.
    pub fn resize(&mut self, height: u16) -> Result<(), S::Error> {
        debug!(height, "Resizing ticket list");
        self.reflow(height)
    }

    /// Move by `delta` within the current height and refresh.
    pub fn scroll(&mut self, delta: isize) -> Result<(), S::Error> {
        debug!(height = self.height, delta, "Scrolling ticket list");
        self.move_by(self.height, delta);
        self.refresh(self.height)
    }

    /// Fetch and format the rows visible at `height`.
    ///
    /// Near the end of the source the cache may return fewer rows than fit;
    /// the highlight is clamped again to the rows actually returned.
    pub fn refresh(&mut self, height: u16) -> Result<(), S::Error> {
        let capacity = self.visible_capacity(height);
        debug!(height, capacity, offset = self.offset, "Refreshing ticket list");

        let records = self.cache.fetch(self.offset, capacity)?;
        let mut rows: Vec<Vec<String>> = records
            .iter()
            .map(|record| format_row(self.columns, record))
            .collect();

        let shown = capacity.min(rows.len());
        self.highlighted = self.highlighted.min(shown.saturating_sub(1));

        let selected = (!rows.is_empty()).then_some(self.highlighted);
        if let (Some(row), Some(marker)) = (
            selected.and_then(|i| rows.get_mut(i)),
            self.columns.iter().position(|c| c.key == SELECTED_KEY),
        ) {
            row[marker] = SELECTED_MARKER.to_string();
        }

        self.visible = VisibleRows { rows, selected };
        Ok(())
    }

    /// Refresh at `height` and return the formatted rows.
    #[cfg(test)]
    pub fn visible_rows(&mut self, height: u16) -> Result<&VisibleRows, S::Error> {
        self.refresh(height)?;
        Ok(&self.visible)
    }

    /// Movement produced by a key at `height`.
    pub fn key_to_movement(&self, key: ListKey, height: u16) -> isize {
        // The float cast saturates; halving keeps `-page` and later sums in range.
        let page = ((self.page_speed * self.visible_capacity(height) as f32) as isize)
            .min(isize::MAX / 2);
        match key {
            ListKey::Up => -1,
            ListKey::Down => 1,
            ListKey::PageUp => -page,
            ListKey::PageDown => page,
            ListKey::Space | ListKey::Enter | ListKey::Other => 0,
        }
    }

    /// Handle keyboard input.
    ///
    /// Space and Enter open the highlighted record. Every key then scrolls by
    /// its movement; keys without one still re-clamp the window.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
    ) -> Result<Option<ListAction<RecordId<S>>>, S::Error> {
        let key = self.bindings.resolve(&key);
        debug!(height = self.height, key = key.token(), "Ticket list keypress");

        let action = if key.is_open() {
            self.open_selected()
        } else {
            None
        };

        let movement = self.key_to_movement(key, self.height);
        self.scroll(movement)?;
        Ok(action)
    }

    /// Resolve the highlighted record into an open action.
    ///
    /// Returns `None` when nothing is cached at the highlighted position.
    pub fn open_selected(&self) -> Option<ListAction<RecordId<S>>> {
        self.selected_record()
            .map(|record| ListAction::Open(record.id()))
    }

    /// The highlighted record, if any.
    pub fn selected_record(&self) -> Option<&S::Record> {
        self.cache.get(self.offset + self.highlighted)
    }

    /// Cache index of the first visible record.
    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Index of the highlighted row within the window.
    #[cfg(test)]
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Height of the list area from the last reflow.
    #[cfg(test)]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The rows produced by the last refresh.
    #[cfg(test)]
    pub fn visible(&self) -> &VisibleRows {
        &self.visible
    }

    /// The underlying cache.
    pub fn cache(&self) -> &PrefetchCache<S> {
        &self.cache
    }

    /// Where the visible window sits in the cached records.
    pub fn paging_summary(&self) -> PagingSummary {
        let shown = self.visible.len();
        PagingSummary {
            first: if shown == 0 { 0 } else { self.offset + 1 },
            last: self.offset + shown,
            cached: self.cache.len(),
            exhausted: self.cache.is_exhausted(),
        }
    }

    /// Draw the rows from the last refresh.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_table(frame, area, self.columns, &self.visible, theme);
    }
}
