//! Pagination types
//!
//! Defines the cursor position and the fetch state machine.

use crate::decode::Page;
use tracing::warn;

/// Pagination position within a window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageCursor {
    /// Opaque cursor, empty for the first page
    pub cursor: String,
    /// Whether another page is expected
    pub has_next: bool,
}

impl PageCursor {
    /// Position before the first page
    pub fn first() -> Self {
        Self {
            cursor: String::new(),
            has_next: true,
        }
    }

    /// Whether this is the first page position
    pub fn is_first(&self) -> bool {
        self.cursor.is_empty()
    }
}

/// Fetch state for one window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// A request with this cursor is due
    Fetching(PageCursor),
    /// Pagination is finished
    Done,
}

impl Default for PageState {
    fn default() -> Self {
        Self::Fetching(PageCursor::first())
    }
}

impl PageState {
    /// Check if pagination is finished
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Next state after receiving `page`
    pub fn after(page: &Page) -> Self {
        if !page.has_next {
            return Self::Done;
        }
        if page.is_empty() {
            warn!("Empty page claims hasNextPage, stopping pagination");
            return Self::Done;
        }
        match &page.end_cursor {
            Some(cursor) => Self::Fetching(PageCursor {
                cursor: cursor.clone(),
                has_next: true,
            }),
            None => {
                warn!("Last edge has no cursor, stopping pagination");
                Self::Done
            }
        }
    }
}
