// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

const ASC_INDICATOR: &str = "↑";
const DESC_INDICATOR: &str = "↓";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(column: impl Into<String>, direction: Option<SortDirection>) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    pub fn active_column(&self) -> Option<(&str, SortDirection)> {
        match (&self.column, self.direction) {
            (Some(column), Some(direction)) => Some((column.as_str(), direction)),
            _ => None,
        }
    }

    /// Direction `key` moves to when its header is activated:
    /// none -> asc -> desc -> none, and any other column restarts at asc.
    pub fn next_direction(&self, key: &str) -> Option<SortDirection> {
        match self.active_column() {
            Some((column, SortDirection::Asc)) if column == key => Some(SortDirection::Desc),
            Some((column, SortDirection::Desc)) if column == key => None,
            _ => Some(SortDirection::Asc),
        }
    }

    pub fn indicator(&self, key: &str) -> Option<&'static str> {
        match self.active_column() {
            Some((column, SortDirection::Asc)) if column == key => Some(ASC_INDICATOR),
            Some((column, SortDirection::Desc)) if column == key => Some(DESC_INDICATOR),
            _ => None,
        }
    }
}
