// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::ops::Range;

pub const COMPACT_THRESHOLD: usize = 10;

const EDGE_PAGES: usize = 3;
const EDGE_ZONE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(usize),
    Ellipsis,
}

/// Up to [`COMPACT_THRESHOLD`] pages every page is listed. Beyond that the
/// first and last three pages are always present and every skipped run,
/// however short, collapses into one [`PageToken::Ellipsis`].
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<PageToken> {
    if total_pages <= COMPACT_THRESHOLD {
        return (1..=total_pages).map(PageToken::Page).collect();
    }

    let mut pages: Vec<usize> = (1..=EDGE_PAGES).collect();
    if current_page <= EDGE_ZONE {
        pages.extend(1..=current_page.saturating_add(1).max(EDGE_PAGES));
    } else if current_page > total_pages - EDGE_ZONE {
        let start = current_page.saturating_sub(1).min(total_pages - 2);
        pages.extend(start..=total_pages);
    } else {
        pages.extend(current_page - 1..=current_page + 1);
    }
    pages.extend(total_pages + 1 - EDGE_PAGES..=total_pages);
    pages.sort_unstable();
    pages.dedup();

    let mut tokens = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        if let Some(previous) = previous {
            if page - previous > 1 {
                tokens.push(PageToken::Ellipsis);
            }
        }
        tokens.push(PageToken::Page(page));
        previous = Some(page);
    }
    tokens
}

pub fn page_count(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

pub fn page_bounds(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub show_info: bool,
    pub total_items: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub tokens: Vec<PageToken>,
    pub info: Option<String>,
}

impl Pagination {
    pub fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
            show_info: false,
            total_items: None,
            page_size: None,
        }
    }

    pub fn show_info(mut self) -> Self {
        self.show_info = true;
        self
    }

    pub fn with_items(mut self, total_items: usize, page_size: usize) -> Self {
        self.total_items = Some(total_items);
        self.page_size = Some(page_size);
        self
    }

    pub fn previous_enabled(&self) -> bool {
        self.current_page > 1
    }

    pub fn next_enabled(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn previous(&self) -> Option<usize> {
        self.previous_enabled().then(|| self.current_page - 1)
    }

    pub fn next(&self) -> Option<usize> {
        self.next_enabled().then(|| self.current_page + 1)
    }

    pub fn activate(&self, token: PageToken) -> Option<usize> {
        match token {
            PageToken::Page(page) => Some(page),
            PageToken::Ellipsis => None,
        }
    }

    pub fn view(&self) -> Option<PaginationView> {
        if self.total_pages <= 1 {
            return None;
        }

        Some(PaginationView {
            current_page: self.current_page,
            previous_enabled: self.previous_enabled(),
            next_enabled: self.next_enabled(),
            tokens: page_window(self.current_page, self.total_pages),
            info: self.show_info.then(|| self.info_text()),
        })
    }

    fn info_text(&self) -> String {
        let pages = format!("page {} of {}", self.current_page, self.total_pages);
        match (self.total_items, self.page_size) {
            (Some(total), Some(size)) if total > 0 => {
                let range = page_bounds(self.current_page, size, total);
                if range.is_empty() {
                    format!("{pages} | {total} items")
                } else {
                    format!("{pages} | {}-{} of {total}", range.start + 1, range.end)
                }
            }
            _ => pages,
        }
    }
}
