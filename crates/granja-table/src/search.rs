// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchBox {
    pub value: String,
    pub placeholder: String,
}

impl SearchBox {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            placeholder: String::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn insert(&self, ch: char) -> String {
        let mut next = self.value.clone();
        next.push(ch);
        next
    }

    pub fn backspace(&self) -> String {
        let mut next = self.value.clone();
        next.pop();
        next
    }

    pub fn cleared(&self) -> String {
        String::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub active: bool,
    pub count: Option<usize>,
}

impl FilterChip {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: false,
            count: None,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn caption(&self) -> String {
        match self.count {
            Some(count) => format!("{} ({count})", self.label),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub value: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    pub caption: String,
    pub active: bool,
}

pub fn search_view(search: Option<&SearchBox>) -> Option<SearchView> {
    search.map(|search| SearchView {
        value: search.value.clone(),
        placeholder: search.placeholder.clone(),
    })
}

pub fn chip_row(filters: &[FilterChip]) -> Option<Vec<ChipView>> {
    if filters.is_empty() {
        return None;
    }
    Some(
        filters
            .iter()
            .map(|chip| ChipView {
                caption: chip.caption(),
                active: chip.active,
            })
            .collect(),
    )
}
