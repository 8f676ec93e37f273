//! Prefix-growing pagination
//!
//! The visible slice is always `records[0 .. pages_loaded * page_size)`.
//! Loading more never discards earlier pages; re-deriving the result set
//! resets to the first page.

use serde::{Deserialize, Serialize};

/// Pagination state. `page_size` and `pages_loaded` are never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPageWindow")]
pub struct PageWindow {
    page_size: usize,
    pages_loaded: usize,
}

#[derive(Deserialize)]
struct RawPageWindow {
    page_size: usize,
    pages_loaded: usize,
}

impl TryFrom<RawPageWindow> for PageWindow {
    type Error = String;

    fn try_from(raw: RawPageWindow) -> Result<Self, Self::Error> {
        if raw.page_size == 0 || raw.pages_loaded == 0 {
            return Err(format!(
                "page window needs page_size and pages_loaded of at least 1, got {} and {}",
                raw.page_size, raw.pages_loaded
            ));
        }
        Ok(Self {
            page_size: raw.page_size,
            pages_loaded: raw.pages_loaded,
        })
    }
}

impl PageWindow {
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            pages_loaded: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Number of visible records out of `total`
    pub fn visible_len(&self, total: usize) -> usize {
        self.pages_loaded.saturating_mul(self.page_size).min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_len(total) < total
    }

    /// The window after one more page is loaded
    pub fn next(self) -> Self {
        Self {
            pages_loaded: self.pages_loaded + 1,
            ..self
        }
    }

    pub fn first_page(self) -> Self {
        Self {
            pages_loaded: 1,
            ..self
        }
    }
}

/// Prefix of `records` visible under `window`
pub fn visible_slice<'a, T>(records: &'a [T], window: &PageWindow) -> &'a [T] {
    &records[..window.visible_len(records.len())]
}

pub fn has_more<T>(records: &[T], window: &PageWindow) -> bool {
    window.has_more(records.len())
}

/// Grow the window by one page
pub fn load_more(window: PageWindow) -> PageWindow {
    window.next()
}

/// Proof that a load-more was started under a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
}

/// Page window plus the in-flight flag that debounces load-more requests.
///
/// A reset bumps the generation, so a ticket issued before the reset can no
/// longer grow the window.
#[derive(Debug, Clone)]
pub struct Paginator {
    window: PageWindow,
    in_flight: bool,
    generation: u64,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            window: PageWindow::new(page_size),
            in_flight: false,
            generation: 0,
        }
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn visible<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        visible_slice(records, &self.window)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.window.has_more(total)
    }

    /// Back to the first page; any outstanding ticket is invalidated.
    pub fn reset(&mut self) {
        self.window = self.window.first_page();
        self.in_flight = false;
        self.generation += 1;
    }

    /// Mark a load as in flight. Returns `None` if one already is.
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(PageTicket {
            generation: self.generation,
        })
    }

    /// Finish a load and grow the window. Stale tickets are ignored.
    pub fn complete(&mut self, ticket: PageTicket) -> bool {
        if ticket.generation != self.generation || !self.in_flight {
            return false;
        }
        self.in_flight = false;
        self.window = self.window.next();
        true
    }

    /// Abandon a load without growing the window.
    pub fn cancel(&mut self, ticket: PageTicket) {
        if ticket.generation == self.generation {
            self.in_flight = false;
        }
    }

    /// Immediate load-more with no delay. No-op when everything is visible
    /// or a load is in flight.
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        match self.begin_load_more() {
            Some(ticket) => self.complete(ticket),
            None => false,
        }
    }
}
