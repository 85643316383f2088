// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use log::debug;
use std::collections::BTreeSet;
use std::fmt;

use crate::{
    CheckState, ChipView, Column, Content, FilterChip, PageToken, Pagination, PaginationView,
    Record, SearchBox, SearchView, Selectable, SortDirection, SortState, chip_row, search_view,
};

const SEARCH_ICON: &str = "⌕";
const EMPTY_ICON: &str = "∅";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderAction {
    pub label: String,
}

impl HeaderAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Header {
    pub title: String,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub actions: Vec<HeaderAction>,
}

impl Header {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn action(mut self, action: HeaderAction) -> Self {
        self.actions.push(action);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmptyState {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub clear_search: bool,
    pub add_new: Option<String>,
}

pub type RowClassFn<R> = Box<dyn Fn(&R, usize) -> Option<String>>;

pub struct Layout<R> {
    pub slim: bool,
    pub class_name: Option<String>,
    pub row_class: Option<RowClassFn<R>>,
}

impl<R> Default for Layout<R> {
    fn default() -> Self {
        Self {
            slim: false,
            class_name: None,
            row_class: None,
        }
    }
}

impl<R> fmt::Debug for Layout<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layout")
            .field("slim", &self.slim)
            .field("class_name", &self.class_name)
            .field("row_class", &self.row_class.as_ref().map(|_| "fn"))
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Empty,
    Populated,
}

impl BodyState {
    pub fn of(loading: bool, rows: usize) -> Self {
        if loading {
            Self::Loading
        } else if rows == 0 {
            Self::Empty
        } else {
            Self::Populated
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub title: String,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeaderView {
    pub key: String,
    pub label: String,
    pub sortable: bool,
    pub indicator: Option<&'static str>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub cells: Vec<Content>,
    pub selected: Option<bool>,
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub clear_search: bool,
    pub add_new: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Loading,
    Empty(EmptyView),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Option<HeaderView>,
    pub search: Option<SearchView>,
    pub filters: Option<Vec<ChipView>>,
    pub columns: Vec<ColumnHeaderView>,
    pub select_all: Option<CheckState>,
    pub body: Body,
    pub pagination: Option<PaginationView>,
    pub slim: bool,
    pub class_name: Option<String>,
    pub rows_clickable: bool,
}

impl TableView {
    pub fn state(&self) -> BodyState {
        match self.body {
            Body::Loading => BodyState::Loading,
            Body::Empty(_) => BodyState::Empty,
            Body::Rows(_) => BodyState::Populated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    HeaderActivated(usize),
    PreviousPage,
    NextPage,
    PageToken(PageToken),
    RowToggled(usize),
    AllToggled,
    SearchTyped(char),
    SearchBackspace,
    SearchCleared,
    FilterClicked(usize),
    ClearSearchClicked,
    AddNewClicked,
    RowClicked(usize),
    HeaderActionClicked(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIntent<Id> {
    Sort {
        column: String,
        direction: Option<SortDirection>,
    },
    PageChange(usize),
    SearchChange(String),
    FilterClick(usize),
    SelectionChange(BTreeSet<Id>),
    ClearSearch,
    AddNew,
    RowClick(usize),
    HeaderAction(usize),
}

pub trait TableHandler<R, Id> {
    fn on_sort(&mut self, _column: &str, _direction: Option<SortDirection>) {}
    fn on_page_change(&mut self, _page: usize) {}
    fn on_search_change(&mut self, _text: String) {}
    fn on_filter_click(&mut self, _index: usize) {}
    fn on_selection_change(&mut self, _selected: BTreeSet<Id>) {}
    fn on_clear_search(&mut self) {}
    fn on_add_new(&mut self) {}
    fn on_row_click(&mut self, _record: &R, _index: usize) {}
    fn on_header_action(&mut self, _index: usize) {}
}

pub struct Table<'a, R, Id> {
    columns: &'a [Column<R>],
    data: &'a [R],
    header: Option<Header>,
    filters: Vec<FilterChip>,
    search: Option<SearchBox>,
    pagination: Option<Pagination>,
    sort: Option<&'a SortState>,
    selectable: Option<Selectable<'a, R, Id>>,
    empty_state: Option<EmptyState>,
    loading: bool,
    layout: Layout<R>,
    row_click: bool,
}

impl<'a, R: Record, Id: Ord + Clone + fmt::Debug> Table<'a, R, Id> {
    pub fn new(columns: &'a [Column<R>], data: &'a [R]) -> Self {
        Self {
            columns,
            data,
            header: None,
            filters: Vec::new(),
            search: None,
            pagination: None,
            sort: None,
            selectable: None,
            empty_state: None,
            loading: false,
            layout: Layout::default(),
            row_click: false,
        }
    }

    pub fn header(mut self, header: Header) -> Self {
        self.header = Some(header);
        self
    }

    pub fn filters(mut self, filters: Vec<FilterChip>) -> Self {
        self.filters = filters;
        self
    }

    pub fn search(mut self, search: SearchBox) -> Self {
        self.search = Some(search);
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn sort(mut self, sort: &'a SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn selectable(mut self, selectable: Selectable<'a, R, Id>) -> Self {
        self.selectable = Some(selectable);
        self
    }

    pub fn empty_state(mut self, empty_state: EmptyState) -> Self {
        self.empty_state = Some(empty_state);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn slim(mut self, slim: bool) -> Self {
        self.layout.slim = slim;
        self
    }

    pub fn class_name(mut self, class: impl Into<String>) -> Self {
        self.layout.class_name = Some(class.into());
        self
    }

    pub fn row_class<F>(mut self, row_class: F) -> Self
    where
        F: Fn(&R, usize) -> Option<String> + 'static,
    {
        self.layout.row_class = Some(Box::new(row_class));
        self
    }

    pub fn row_click(mut self) -> Self {
        self.row_click = true;
        self
    }

    pub fn state(&self) -> BodyState {
        BodyState::of(self.loading, self.data.len())
    }

    pub fn view(&self) -> TableView {
        let state = self.state();
        let body = match state {
            BodyState::Loading => Body::Loading,
            BodyState::Empty => Body::Empty(self.empty_view()),
            BodyState::Populated => Body::Rows(self.row_views()),
        };

        TableView {
            header: self.header.as_ref().map(|header| HeaderView {
                title: header.title.clone(),
                badge: header.badge.clone(),
                description: header.description.clone(),
                actions: header
                    .actions
                    .iter()
                    .map(|action| action.label.clone())
                    .collect(),
            }),
            search: search_view(self.search.as_ref()),
            filters: chip_row(&self.filters),
            columns: self.column_views(),
            select_all: match state {
                BodyState::Populated => self
                    .selectable
                    .as_ref()
                    .map(|selectable| selectable.header_state(self.data)),
                BodyState::Loading | BodyState::Empty => None,
            },
            body,
            pagination: self.pagination.as_ref().and_then(Pagination::view),
            slim: self.layout.slim,
            class_name: self.layout.class_name.clone(),
            rows_clickable: self.row_click,
        }
    }

    /// Resolves a gesture against the current inputs. `None` means the
    /// gesture is inert here: a non-sortable header, a disabled page button,
    /// an ellipsis, an index past the rendered items, or a handler the caller
    /// did not supply.
    pub fn handle(&self, gesture: Gesture) -> Option<TableIntent<Id>> {
        let intent = self.resolve(gesture);
        if let Some(intent) = &intent {
            debug!("table intent {intent:?}");
        }
        intent
    }

    pub fn dispatch<H>(&self, gesture: Gesture, handler: &mut H) -> bool
    where
        H: TableHandler<R, Id>,
    {
        let Some(intent) = self.handle(gesture) else {
            return false;
        };

        match intent {
            TableIntent::Sort { column, direction } => handler.on_sort(&column, direction),
            TableIntent::PageChange(page) => handler.on_page_change(page),
            TableIntent::SearchChange(text) => handler.on_search_change(text),
            TableIntent::FilterClick(index) => handler.on_filter_click(index),
            TableIntent::SelectionChange(selected) => handler.on_selection_change(selected),
            TableIntent::ClearSearch => handler.on_clear_search(),
            TableIntent::AddNew => handler.on_add_new(),
            TableIntent::RowClick(index) => match self.data.get(index) {
                Some(record) => handler.on_row_click(record, index),
                None => return false,
            },
            TableIntent::HeaderAction(index) => handler.on_header_action(index),
        }
        true
    }

    fn resolve(&self, gesture: Gesture) -> Option<TableIntent<Id>> {
        let populated = self.state() == BodyState::Populated;
        match gesture {
            Gesture::HeaderActivated(index) => {
                if !populated {
                    return None;
                }
                let column = self.columns.get(index).filter(|column| column.sortable)?;
                let sort = self.sort?;
                Some(TableIntent::Sort {
                    column: column.key.clone(),
                    direction: sort.next_direction(&column.key),
                })
            }
            Gesture::PreviousPage => {
                let pagination = self.visible_pagination()?;
                pagination.previous().map(TableIntent::PageChange)
            }
            Gesture::NextPage => {
                let pagination = self.visible_pagination()?;
                pagination.next().map(TableIntent::PageChange)
            }
            Gesture::PageToken(token) => {
                let pagination = self.visible_pagination()?;
                let view = pagination.view()?;
                if !view.tokens.contains(&token) {
                    return None;
                }
                pagination.activate(token).map(TableIntent::PageChange)
            }
            Gesture::RowToggled(index) => {
                if !populated {
                    return None;
                }
                let selectable = self.selectable.as_ref()?;
                let record = self.data.get(index)?;
                Some(TableIntent::SelectionChange(
                    selectable.toggle_row(selectable.row_id(record)),
                ))
            }
            Gesture::AllToggled => {
                if !populated {
                    return None;
                }
                let selectable = self.selectable.as_ref()?;
                Some(TableIntent::SelectionChange(
                    selectable.toggle_all(self.data),
                ))
            }
            Gesture::SearchTyped(ch) => self
                .search
                .as_ref()
                .map(|search| TableIntent::SearchChange(search.insert(ch))),
            Gesture::SearchBackspace => self
                .search
                .as_ref()
                .map(|search| TableIntent::SearchChange(search.backspace())),
            Gesture::SearchCleared => self
                .search
                .as_ref()
                .map(|search| TableIntent::SearchChange(search.cleared())),
            Gesture::FilterClicked(index) => {
                (index < self.filters.len()).then_some(TableIntent::FilterClick(index))
            }
            Gesture::ClearSearchClicked => {
                if self.state() != BodyState::Empty || !self.clear_search_offered() {
                    return None;
                }
                if self.has_clear_handler() {
                    Some(TableIntent::ClearSearch)
                } else {
                    Some(TableIntent::SearchChange(String::new()))
                }
            }
            Gesture::AddNewClicked => {
                if self.state() != BodyState::Empty {
                    return None;
                }
                self.empty_state
                    .as_ref()
                    .and_then(|empty| empty.add_new.as_ref())
                    .map(|_| TableIntent::AddNew)
            }
            Gesture::RowClicked(index) => {
                (populated && self.row_click && index < self.data.len())
                    .then_some(TableIntent::RowClick(index))
            }
            Gesture::HeaderActionClicked(index) => {
                let header = self.header.as_ref()?;
                (index < header.actions.len()).then_some(TableIntent::HeaderAction(index))
            }
        }
    }

    fn visible_pagination(&self) -> Option<&Pagination> {
        self.pagination
            .as_ref()
            .filter(|pagination| pagination.total_pages > 1)
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_ref()
            .map(|search| search.value.as_str())
            .filter(|value| !value.is_empty())
    }

    fn has_clear_handler(&self) -> bool {
        self.empty_state
            .as_ref()
            .is_some_and(|empty| empty.clear_search)
    }

    fn clear_search_offered(&self) -> bool {
        self.has_clear_handler() || self.search_term().is_some()
    }

    fn column_views(&self) -> Vec<ColumnHeaderView> {
        self.columns
            .iter()
            .map(|column| ColumnHeaderView {
                key: column.key.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                indicator: self.sort.and_then(|sort| sort.indicator(&column.key)),
                class: column.header_class_name.clone(),
            })
            .collect()
    }

    fn row_views(&self) -> Vec<RowView> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, record)| RowView {
                index,
                cells: self
                    .columns
                    .iter()
                    .map(|column| {
                        let mut content = column.cell(record, index);
                        if content.class.is_none() {
                            content.class = column.class_name.clone();
                        }
                        content
                    })
                    .collect(),
                selected: self
                    .selectable
                    .as_ref()
                    .map(|selectable| selectable.is_selected(record)),
                class: self
                    .layout
                    .row_class
                    .as_ref()
                    .and_then(|row_class| row_class(record, index)),
            })
            .collect()
    }

    fn empty_view(&self) -> EmptyView {
        let empty = self.empty_state.clone().unwrap_or_default();
        let term = self.search_term();

        let description = empty.description.unwrap_or_else(|| match term {
            Some(term) => format!("No records match \"{term}\". Try a different search."),
            None => "There is no data to show yet.".to_owned(),
        });
        let title = empty.title.unwrap_or_else(|| {
            if term.is_some() {
                "No results".to_owned()
            } else {
                "Nothing here yet".to_owned()
            }
        });
        let icon = empty.icon.unwrap_or_else(|| {
            if term.is_some() {
                SEARCH_ICON.to_owned()
            } else {
                EMPTY_ICON.to_owned()
            }
        });

        EmptyView {
            icon,
            title,
            description,
            clear_search: self.clear_search_offered(),
            add_new: empty.add_new,
        }
    }
}

impl<R, Id: fmt::Debug> fmt::Debug for Table<'_, R, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns.len())
            .field("rows", &self.data.len())
            .field("header", &self.header)
            .field("filters", &self.filters)
            .field("search", &self.search)
            .field("pagination", &self.pagination)
            .field("sort", &self.sort)
            .field("selectable", &self.selectable)
            .field("empty_state", &self.empty_state)
            .field("loading", &self.loading)
            .field("layout", &self.layout)
            .field("row_click", &self.row_click)
            .finish()
    }
}
