use std::ops::Range;

/// Rows one task occupies: title, status line and a spacer.
pub const ITEM_ROWS: usize = 3;

/// Focus and scroll position of the task list.
///
/// `scroll_offset` counts rows and is always a whole number of item
/// blocks. It stays within `[0, (len - page_capacity) * ITEM_ROWS]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    focus: Option<usize>,
    scroll_offset: usize,
    len: usize,
    page_capacity: usize,
}

impl Viewport {
    pub fn new(len: usize, list_height: usize) -> Self {
        Viewport {
            focus: None,
            scroll_offset: 0,
            len,
            page_capacity: list_height / ITEM_ROWS,
        }
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Whole items that fit in the list area
    pub fn page_capacity(&self) -> usize {
        self.page_capacity
    }

    /// Index of the first visible item
    pub fn first_visible(&self) -> usize {
        self.scroll_offset / ITEM_ROWS
    }

    pub fn max_scroll(&self) -> usize {
        self.len.saturating_sub(self.page_capacity) * ITEM_ROWS
    }

    /// Items on screen plus one lookahead item that may be partly visible.
    pub fn visible_range(&self) -> Range<usize> {
        let first = self.first_visible().min(self.len);
        let end = (first + self.page_capacity + 1).min(self.len);
        first..end
    }

    /// Drop focus and scroll back to the top.
    pub fn reset(&mut self) {
        self.focus = None;
        self.scroll_offset = 0;
    }

    /// New list area height. Position is not preserved.
    pub fn resize(&mut self, list_height: usize) {
        self.page_capacity = list_height / ITEM_ROWS;
        self.reset();
    }

    /// Track the list length; a change resets the position. Returns true
    /// when it did.
    pub fn sync_len(&mut self, len: usize) -> bool {
        if len == self.len {
            return false;
        }
        self.len = len;
        self.reset();
        true
    }

    pub fn move_up(&mut self) {
        let Some(focus) = self.focus else {
            return;
        };
        let focus = focus.saturating_sub(1);
        self.focus = Some(focus);
        if focus < self.first_visible() {
            self.scroll_offset = self.scroll_offset.saturating_sub(ITEM_ROWS);
        }
    }

    pub fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        let focus = match self.focus {
            None => 0,
            Some(f) if f + 1 >= self.len => return,
            Some(f) => f + 1,
        };
        self.focus = Some(focus);
        if focus + 1 > self.first_visible() + self.page_capacity {
            // never past the focused item, even when no whole item fits
            self.scroll_offset = (self.scroll_offset + ITEM_ROWS)
                .min(self.max_scroll())
                .min(focus * ITEM_ROWS);
        }
    }

    pub fn home(&mut self) {
        if self.len == 0 {
            return;
        }
        self.focus = Some(0);
        self.scroll_offset = 0;
    }

    pub fn end(&mut self) {
        if self.len == 0 {
            return;
        }
        self.focus = Some(self.len - 1);
        self.scroll_offset = self.max_scroll().min((self.len - 1) * ITEM_ROWS);
    }
}
