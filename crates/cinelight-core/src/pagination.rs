//! Page-selector planning for result listings.
//!
//! [`plan`] maps the current page and the total page count to a bounded row of
//! controls: a `Prev` button, a window of page numbers and ellipses, and a `Next`
//! button. The window never holds more than seven entries, however many pages
//! the query has.

use serde::{Deserialize, Serialize};

/// Page counts up to this value list every page without ellipses.
const FULL_LISTING_LIMIT: u32 = 5;

/// Upper bound on the number of window entries (pages plus ellipses).
pub const MAX_WINDOW_LEN: usize = 7;

/// One element of the pagination row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageControl {
    /// Go to the previous page; `target` is `None` on the first page.
    Prev { target: Option<u32> },
    /// A numbered page button.
    Page { number: u32, active: bool },
    /// Placeholder for skipped pages. Never numbered, never active.
    Ellipsis,
    /// Go to the next page; `target` is `None` on the last page.
    Next { target: Option<u32> },
}

impl PageControl {
    pub fn is_active(&self) -> bool {
        matches!(self, PageControl::Page { active: true, .. })
    }

    /// Disabled controls do not navigate. Numbered pages are always enabled.
    pub fn is_disabled(&self) -> bool {
        match self {
            PageControl::Prev { target } | PageControl::Next { target } => target.is_none(),
            PageControl::Page { .. } => false,
            PageControl::Ellipsis => true,
        }
    }

    /// Page this control navigates to, if any.
    pub fn target(&self) -> Option<u32> {
        match self {
            PageControl::Prev { target } | PageControl::Next { target } => *target,
            PageControl::Page { number, .. } => Some(*number),
            PageControl::Ellipsis => None,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageControl::Ellipsis)
    }
}

/// Planned pagination row for one `(current, total_pages)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    current: u32,
    total_pages: u32,
    window: Vec<PageControl>,
}

impl Pagination {
    /// Current page after clamping into `1..=total_pages`.
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// True when there is nothing to render (zero or one page).
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Page numbers and ellipses, without the Prev/Next buttons.
    pub fn window(&self) -> &[PageControl] {
        &self.window
    }

    pub fn prev(&self) -> Option<PageControl> {
        (!self.is_empty()).then(|| PageControl::Prev {
            target: (self.current > 1).then(|| self.current - 1),
        })
    }

    pub fn next(&self) -> Option<PageControl> {
        (!self.is_empty()).then(|| PageControl::Next {
            target: (self.current < self.total_pages).then(|| self.current + 1),
        })
    }

    /// Full row in render order: Prev, window, Next. Empty when there is at
    /// most one page.
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(self.window.len() + 2);
        controls.extend(self.prev());
        controls.extend(self.window.iter().copied());
        controls.extend(self.next());
        controls
    }
}

/// Plans the pagination row for `current` out of `total_pages`.
///
/// `current` is clamped into `1..=total_pages`. The result is a pure function
/// of its inputs.
pub fn plan(current: u32, total_pages: u32) -> Pagination {
    let current = current.clamp(1, total_pages.max(1));
    Pagination {
        current,
        total_pages,
        window: plan_window(current, total_pages),
    }
}

/// Window of page numbers and ellipses for an already clamped `current`.
fn plan_window(current: u32, total: u32) -> Vec<PageControl> {
    if total <= 1 {
        return Vec::new();
    }

    if total <= FULL_LISTING_LIMIT {
        return (1..=total).map(|n| page(n, current)).collect();
    }

    // `None` marks an ellipsis.
    let slots: Vec<Option<u32>> = if current <= 2 {
        vec![Some(1), Some(2), Some(3), None, Some(total)]
    } else if current >= total - 1 {
        vec![Some(1), None, Some(total - 2), Some(total - 1), Some(total)]
    } else if current == 3 {
        vec![Some(1), Some(2), Some(3), Some(4), None, Some(total)]
    } else if current == total - 2 {
        vec![
            Some(1),
            None,
            Some(total - 3),
            Some(total - 2),
            Some(total - 1),
            Some(total),
        ]
    } else {
        vec![
            Some(1),
            None,
            Some(current - 1),
            Some(current),
            Some(current + 1),
            None,
            Some(total),
        ]
    };

    slots
        .into_iter()
        .map(|slot| match slot {
            Some(n) => page(n, current),
            None => PageControl::Ellipsis,
        })
        .collect()
}

fn page(number: u32, current: u32) -> PageControl {
    PageControl::Page {
        number,
        active: number == current,
    }
}
