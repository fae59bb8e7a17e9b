use std::collections::BTreeSet;

/// Pages shown on each side of the current page.
pub const WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl PaginationInfo {
    /// Clamps `current_page` into `[1, max(total_pages, 1)]`.
    pub fn new(current_page: u32, total_pages: u32, total_items: u64) -> Self {
        Self {
            current_page: current_page.clamp(1, total_pages.max(1)),
            total_pages,
            total_items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous { target: u32, enabled: bool },
    Page { number: u32, active: bool },
    Ellipsis,
    Next { target: u32, enabled: bool },
}

impl PageControl {
    /// The page a click on this control requests, if the click does anything.
    pub fn selectable_target(&self) -> Option<u32> {
        match *self {
            PageControl::Previous { target, enabled } | PageControl::Next { target, enabled } => {
                enabled.then_some(target)
            }
            PageControl::Page { number, active } => (!active).then_some(number),
            PageControl::Ellipsis => None,
        }
    }
}

/// Ascending page numbers to show: first, last, and a window around the current page.
pub fn visible_pages(info: &PaginationInfo) -> Vec<u32> {
    let total = info.total_pages;
    if total == 0 {
        return Vec::new();
    }
    let current = info.current_page.clamp(1, total);

    let mut pages = BTreeSet::from([1, total]);
    let low = current.saturating_sub(WINDOW_RADIUS).max(2);
    let high = current.saturating_add(WINDOW_RADIUS).min(total - 1);
    pages.extend(low..=high);
    pages.into_iter().collect()
}

pub fn page_controls(info: &PaginationInfo) -> Vec<PageControl> {
    if info.total_pages <= 1 {
        return Vec::new();
    }
    let current = info.current_page.clamp(1, info.total_pages);
    let pages = visible_pages(info);

    let mut controls = Vec::with_capacity(pages.len() * 2 + 2);
    controls.push(PageControl::Previous {
        target: current.saturating_sub(1).max(1),
        enabled: current > 1,
    });

    let mut last = None;
    for page in pages {
        if let Some(previous) = last {
            if page > previous + 1 {
                controls.push(PageControl::Ellipsis);
            }
        }
        controls.push(PageControl::Page {
            number: page,
            active: page == current,
        });
        last = Some(page);
    }

    controls.push(PageControl::Next {
        target: current.saturating_add(1).min(info.total_pages),
        enabled: current < info.total_pages,
    });
    controls
}
