// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use granja_app::{ChipRule, FarmProfile, Listing, ScreenKind, Supplier, TeamMember};
use granja_table::{
    Column, EmptyState, FilterChip, Gesture, Header, HeaderAction, Pagination, Record, SearchBox,
    Selectable, SortDirection, SortState, Table, TableHandler, TableView, page_bounds, page_count,
};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BTreeSet;

const REMOVE_ACTION: usize = 0;
const RELOAD_ACTION: usize = 1;
const LOAD_SAMPLE_LABEL: &str = "load sample data";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub page_size: usize,
    pub slim: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            slim: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenData {
    Profiles(Vec<FarmProfile>),
    Team(Vec<TeamMember>),
    Suppliers(Vec<Supplier>),
}

impl ScreenData {
    pub const fn kind(&self) -> ScreenKind {
        match self {
            Self::Profiles(_) => ScreenKind::Profiles,
            Self::Team(_) => ScreenKind::Team,
            Self::Suppliers(_) => ScreenKind::Suppliers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenStatus {
    Sorted {
        column: String,
        direction: SortDirection,
    },
    SortCleared,
    Selected(usize),
    SearchCleared,
    Opened {
        noun: &'static str,
        id: String,
        name: String,
    },
    Removed {
        noun: &'static str,
        count: usize,
    },
    NothingSelected,
    Loaded {
        noun: &'static str,
        count: usize,
    },
    LoadFailed(String),
    Unavailable(&'static str),
}

impl ScreenStatus {
    pub fn message(&self) -> String {
        match self {
            Self::Sorted { column, direction } => format!("sort {column} {}", direction.as_str()),
            Self::SortCleared => "sort cleared".to_owned(),
            Self::Selected(count) => format!("{count} selected"),
            Self::SearchCleared => "search cleared".to_owned(),
            Self::Opened { noun, id, name } => format!("{noun} {id}: {name}"),
            Self::Removed { noun, count } => format!("removed {count} {}", plural(noun, *count)),
            Self::NothingSelected => "select rows first".to_owned(),
            Self::Loaded { noun, count } => format!("loaded {count} {}", plural(noun, *count)),
            Self::LoadFailed(error) => format!("load failed: {error}"),
            Self::Unavailable(what) => format!("{what} unavailable"),
        }
    }
}

fn plural(noun: &str, count: usize) -> String {
    if count == 1 {
        noun.to_owned()
    } else {
        format!("{noun}s")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEffect {
    Status(ScreenStatus),
    RemoveSelected,
    Reload,
}

#[derive(Debug, Clone)]
struct Controls<Id> {
    search: String,
    chip: usize,
    sort: SortState,
    page: usize,
    selected: BTreeSet<Id>,
    effects: Vec<ScreenEffect>,
}

impl<Id> Default for Controls<Id> {
    fn default() -> Self {
        Self {
            search: String::new(),
            chip: 0,
            sort: SortState::none(),
            page: 1,
            selected: BTreeSet::new(),
            effects: Vec::new(),
        }
    }
}

impl<R: Listing> TableHandler<R, R::Id> for Controls<R::Id> {
    fn on_sort(&mut self, column: &str, direction: Option<SortDirection>) {
        self.page = 1;
        let status = match direction {
            Some(direction) => {
                self.sort = SortState::new(column, Some(direction));
                ScreenStatus::Sorted {
                    column: column.to_owned(),
                    direction,
                }
            }
            None => {
                self.sort = SortState::none();
                ScreenStatus::SortCleared
            }
        };
        self.effects.push(ScreenEffect::Status(status));
    }

    fn on_page_change(&mut self, page: usize) {
        self.page = page;
    }

    fn on_search_change(&mut self, text: String) {
        self.search = text;
        self.page = 1;
    }

    fn on_filter_click(&mut self, index: usize) {
        self.chip = index;
        self.page = 1;
    }

    fn on_selection_change(&mut self, selected: BTreeSet<R::Id>) {
        self.effects
            .push(ScreenEffect::Status(ScreenStatus::Selected(selected.len())));
        self.selected = selected;
    }

    fn on_clear_search(&mut self) {
        self.search.clear();
        self.chip = 0;
        self.page = 1;
        self.effects
            .push(ScreenEffect::Status(ScreenStatus::SearchCleared));
    }

    fn on_add_new(&mut self) {
        self.effects.push(ScreenEffect::Reload);
    }

    fn on_row_click(&mut self, record: &R, _index: usize) {
        self.effects.push(ScreenEffect::Status(ScreenStatus::Opened {
            noun: R::NOUN,
            id: record.id().to_string(),
            name: record.name().to_owned(),
        }));
    }

    fn on_header_action(&mut self, index: usize) {
        match index {
            REMOVE_ACTION => self.effects.push(ScreenEffect::RemoveSelected),
            RELOAD_ACTION => self.effects.push(ScreenEffect::Reload),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    page_size: usize,
    slim: bool,
    loading: bool,
}

pub struct Screen<R: Listing> {
    records: Vec<R>,
    columns: Vec<Column<R>>,
    chips: Vec<ChipRule<R>>,
    controls: Controls<R::Id>,
    options: UiOptions,
    loading: bool,
    loaded: bool,
    load_token: Option<u64>,
    cursor_row: usize,
    cursor_col: usize,
}

impl<R: Listing> Screen<R> {
    pub fn new(options: UiOptions) -> Self {
        Self {
            records: Vec::new(),
            columns: R::columns(),
            chips: R::chips(),
            controls: Controls::default(),
            options,
            loading: false,
            loaded: false,
            load_token: None,
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn selected(&self) -> &BTreeSet<R::Id> {
        &self.controls.selected
    }

    pub fn search(&self) -> &str {
        &self.controls.search
    }

    pub fn page(&self) -> usize {
        self.controls.page
    }

    pub fn sort(&self) -> &SortState {
        &self.controls.sort
    }

    pub fn begin_loading(&mut self, token: u64) {
        self.loading = true;
        self.load_token = Some(token);
    }

    /// Ignores results from loads that were superseded by a newer one.
    pub fn finish_loading(&mut self, token: u64, records: Vec<R>) -> Option<ScreenStatus> {
        if self.load_token != Some(token) {
            debug!("dropping stale {} load {token}", R::NOUN);
            return None;
        }
        self.load_token = None;
        self.loading = false;
        self.loaded = true;

        let ids: BTreeSet<R::Id> = records.iter().map(Listing::id).collect();
        self.controls.selected.retain(|id| ids.contains(id));
        self.records = records;
        self.clamp();
        info!("loaded {} {}s", self.records.len(), R::NOUN);
        Some(ScreenStatus::Loaded {
            noun: R::NOUN,
            count: self.records.len(),
        })
    }

    pub fn fail_loading(&mut self, token: u64) -> bool {
        if self.load_token != Some(token) {
            return false;
        }
        self.load_token = None;
        self.loading = false;
        true
    }

    pub fn filtered(&self) -> Vec<R> {
        let keep = self.chips.get(self.controls.chip).map(|chip| chip.keep);
        let mut rows: Vec<R> = self
            .records
            .iter()
            .filter(|record| record.matches(&self.controls.search))
            .filter(|record| keep.is_none_or(|keep| keep(record)))
            .cloned()
            .collect();
        if let Some((column, direction)) = self.controls.sort.active_column() {
            rows.sort_by(|left, right| compare_field(left, right, column, direction));
        }
        rows
    }

    pub fn view(&self) -> TableView {
        let filtered = self.filtered();
        assemble(
            &self.columns,
            &self.chips,
            &self.records,
            &self.controls,
            &filtered,
            self.settings(),
        )
        .view()
    }

    pub fn gesture(&mut self, gesture: Gesture) -> Option<Vec<ScreenEffect>> {
        let filtered = self.filtered();
        let snapshot = self.controls.clone();
        let settings = self.settings();
        let fired = assemble(
            &self.columns,
            &self.chips,
            &self.records,
            &snapshot,
            &filtered,
            settings,
        )
        .dispatch(gesture, &mut self.controls);
        if !fired {
            return None;
        }

        let mut effects = Vec::new();
        for effect in std::mem::take(&mut self.controls.effects) {
            match effect {
                ScreenEffect::RemoveSelected => {
                    effects.push(ScreenEffect::Status(self.remove_selected()));
                }
                other => effects.push(other),
            }
        }
        self.clamp();
        Some(effects)
    }

    pub fn move_row(&mut self, delta: isize) {
        let rows = self.page_len();
        if rows == 0 {
            self.cursor_row = 0;
            return;
        }
        self.cursor_row = self.cursor_row.saturating_add_signed(delta).min(rows - 1);
    }

    pub fn move_column(&mut self, delta: isize) {
        let last = self.columns.len().saturating_sub(1);
        self.cursor_col = self.cursor_col.saturating_add_signed(delta).min(last);
    }

    fn remove_selected(&mut self) -> ScreenStatus {
        if self.controls.selected.is_empty() {
            return ScreenStatus::NothingSelected;
        }
        let before = self.records.len();
        let selected = std::mem::take(&mut self.controls.selected);
        self.records.retain(|record| !selected.contains(&record.id()));
        let count = before - self.records.len();
        info!("removed {count} {}s", R::NOUN);
        ScreenStatus::Removed {
            noun: R::NOUN,
            count,
        }
    }

    fn page_len(&self) -> usize {
        let filtered = self.filtered().len();
        page_bounds(self.controls.page, self.options.page_size, filtered).len()
    }

    fn clamp(&mut self) {
        let filtered = self.filtered().len();
        let total = page_count(filtered, self.options.page_size);
        self.controls.page = self.controls.page.clamp(1, total);
        let rows = page_bounds(self.controls.page, self.options.page_size, filtered).len();
        self.cursor_row = self.cursor_row.min(rows.saturating_sub(1));
        self.cursor_col = self.cursor_col.min(self.columns.len().saturating_sub(1));
    }

    fn settings(&self) -> Settings {
        Settings {
            page_size: self.options.page_size,
            slim: self.options.slim,
            loading: self.loading,
        }
    }
}

/// Missing values sort after present ones in either direction.
fn compare_field<R: Record>(
    left: &R,
    right: &R,
    column: &str,
    direction: SortDirection,
) -> Ordering {
    match (left.field(column), right.field(column)) {
        (Some(left), Some(right)) => {
            let ordering = left.cmp_value(&right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn assemble<'a, R: Listing>(
    columns: &'a [Column<R>],
    chips: &[ChipRule<R>],
    records: &[R],
    controls: &'a Controls<R::Id>,
    filtered: &'a [R],
    settings: Settings,
) -> Table<'a, R, R::Id> {
    let total_pages = page_count(filtered.len(), settings.page_size);
    let current_page = controls.page.clamp(1, total_pages);
    let page_rows = &filtered[page_bounds(current_page, settings.page_size, filtered.len())];

    let filters = chips
        .iter()
        .enumerate()
        .map(|(index, chip)| {
            let count = records
                .iter()
                .filter(|record| record.matches(&controls.search) && (chip.keep)(record))
                .count();
            FilterChip::new(chip.label)
                .active(index == controls.chip)
                .count(count)
        })
        .collect();

    let empty_state = if records.is_empty() {
        EmptyState {
            title: Some(format!("No {}s", R::NOUN)),
            description: Some(format!("There are no {}s on this screen.", R::NOUN)),
            add_new: Some(LOAD_SAMPLE_LABEL.to_owned()),
            ..EmptyState::default()
        }
    } else {
        EmptyState {
            clear_search: controls.chip != 0,
            ..EmptyState::default()
        }
    };

    Table::new(columns, page_rows)
        .header(
            Header::new(R::TITLE)
                .badge(filtered.len().to_string())
                .description(R::DESCRIPTION)
                .action(HeaderAction::new("remove selected"))
                .action(HeaderAction::new("reload")),
        )
        .search(SearchBox::new(controls.search.clone()).placeholder(format!("search {}s", R::NOUN)))
        .filters(filters)
        .pagination(
            Pagination::new(current_page, total_pages)
                .show_info()
                .with_items(filtered.len(), settings.page_size),
        )
        .sort(&controls.sort)
        .selectable(Selectable::new(&controls.selected, <R as Listing>::id).with_all_data(filtered))
        .empty_state(empty_state)
        .loading(settings.loading)
        .slim(settings.slim)
        .row_class(|record: &R, _| record.row_class().map(str::to_owned))
        .row_click()
}

pub trait ScreenView {
    fn kind(&self) -> ScreenKind;
    fn view(&self) -> TableView;
    fn gesture(&mut self, gesture: Gesture) -> Option<Vec<ScreenEffect>>;
    fn move_row(&mut self, delta: isize);
    fn move_column(&mut self, delta: isize);
    fn cursor(&self) -> (usize, usize);
    fn needs_load(&self) -> bool;
    fn begin_loading(&mut self, token: u64);
    fn fail_loading(&mut self, token: u64) -> bool;
}

impl<R: Listing> ScreenView for Screen<R> {
    fn kind(&self) -> ScreenKind {
        R::SCREEN
    }

    fn view(&self) -> TableView {
        Screen::view(self)
    }

    fn gesture(&mut self, gesture: Gesture) -> Option<Vec<ScreenEffect>> {
        Screen::gesture(self, gesture)
    }

    fn move_row(&mut self, delta: isize) {
        Screen::move_row(self, delta);
    }

    fn move_column(&mut self, delta: isize) {
        Screen::move_column(self, delta);
    }

    fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    fn needs_load(&self) -> bool {
        !self.loaded && !self.loading
    }

    fn begin_loading(&mut self, token: u64) {
        Screen::begin_loading(self, token);
    }

    fn fail_loading(&mut self, token: u64) -> bool {
        Screen::fail_loading(self, token)
    }
}

pub struct Screens {
    pub profiles: Screen<FarmProfile>,
    pub team: Screen<TeamMember>,
    pub suppliers: Screen<Supplier>,
}

impl Screens {
    pub fn new(options: UiOptions) -> Self {
        Self {
            profiles: Screen::new(options),
            team: Screen::new(options),
            suppliers: Screen::new(options),
        }
    }

    pub fn get(&self, kind: ScreenKind) -> &dyn ScreenView {
        match kind {
            ScreenKind::Profiles => &self.profiles,
            ScreenKind::Team => &self.team,
            ScreenKind::Suppliers => &self.suppliers,
        }
    }

    pub fn get_mut(&mut self, kind: ScreenKind) -> &mut dyn ScreenView {
        match kind {
            ScreenKind::Profiles => &mut self.profiles,
            ScreenKind::Team => &mut self.team,
            ScreenKind::Suppliers => &mut self.suppliers,
        }
    }

    pub fn finish_loading(&mut self, token: u64, data: ScreenData) -> Option<ScreenStatus> {
        match data {
            ScreenData::Profiles(records) => self.profiles.finish_loading(token, records),
            ScreenData::Team(records) => self.team.finish_loading(token, records),
            ScreenData::Suppliers(records) => self.suppliers.finish_loading(token, records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Screen, ScreenEffect, ScreenStatus, ScreenView, UiOptions};
    use granja_app::{Supplier, SupplierCategory, SupplierId};
    use granja_table::{Body, CheckState, Gesture, PageToken, SortDirection, SortState};

    fn supplier(id: i64, name: &str, category: SupplierCategory) -> Supplier {
        Supplier {
            id: SupplierId::new(id),
            name: name.to_owned(),
            contact_name: format!("Contact {id}"),
            phone: String::new(),
            category,
            city: "Erechim".to_owned(),
            open_balance_cents: id * 100,
            last_order: None,
        }
    }

    fn loaded(count: i64, page_size: usize) -> Screen<Supplier> {
        let mut screen = Screen::new(UiOptions {
            page_size,
            slim: false,
        });
        let records = (1..=count)
            .map(|id| {
                let category = if id % 2 == 0 {
                    SupplierCategory::Seed
                } else {
                    SupplierCategory::Feed
                };
                supplier(id, &format!("Supplier {id:02}"), category)
            })
            .collect();
        screen.begin_loading(1);
        screen.finish_loading(1, records);
        screen
    }

    fn names(screen: &Screen<Supplier>) -> Vec<String> {
        screen
            .filtered()
            .into_iter()
            .map(|supplier| supplier.name)
            .collect()
    }

    #[test]
    fn loading_state_until_records_arrive() {
        let mut screen = Screen::<Supplier>::new(UiOptions::default());
        assert!(ScreenView::needs_load(&screen));
        screen.begin_loading(4);
        assert_eq!(screen.view().body, Body::Loading);
        assert!(!ScreenView::needs_load(&screen));

        assert_eq!(screen.finish_loading(3, Vec::new()), None);
        assert_eq!(screen.view().body, Body::Loading);

        let status = screen.finish_loading(4, vec![supplier(1, "Agro", SupplierCategory::Seed)]);
        assert_eq!(
            status,
            Some(ScreenStatus::Loaded {
                noun: "supplier",
                count: 1
            })
        );
        assert!(matches!(screen.view().body, Body::Rows(_)));
    }

    #[test]
    fn sort_gesture_cycles_and_orders_rows() {
        let mut screen = loaded(3, 10);
        screen.gesture(Gesture::HeaderActivated(0));
        assert_eq!(
            screen.sort(),
            &SortState::new("name", Some(SortDirection::Asc))
        );
        assert_eq!(names(&screen)[0], "Supplier 01");

        screen.gesture(Gesture::HeaderActivated(0));
        assert_eq!(names(&screen)[0], "Supplier 03");

        let effects = screen.gesture(Gesture::HeaderActivated(0));
        assert_eq!(
            effects,
            Some(vec![ScreenEffect::Status(ScreenStatus::SortCleared)])
        );
        assert_eq!(screen.sort().active_column(), None);
    }

    #[test]
    fn unsortable_column_is_inert() {
        let mut screen = loaded(3, 10);
        assert_eq!(screen.gesture(Gesture::HeaderActivated(1)), None);
    }

    #[test]
    fn select_all_spans_every_filtered_page() {
        let mut screen = loaded(25, 10);
        screen.gesture(Gesture::AllToggled);
        assert_eq!(screen.selected().len(), 25);
        assert_eq!(screen.view().select_all, Some(CheckState::Checked));

        screen.gesture(Gesture::RowToggled(0));
        assert_eq!(screen.selected().len(), 24);
        assert_eq!(screen.view().select_all, Some(CheckState::Indeterminate));
    }

    #[test]
    fn paging_moves_through_filtered_rows() {
        let mut screen = loaded(25, 10);
        assert_eq!(screen.gesture(Gesture::PreviousPage), None);
        screen.gesture(Gesture::PageToken(PageToken::Page(3)));
        assert_eq!(screen.page(), 3);
        assert_eq!(screen.gesture(Gesture::NextPage), None);

        let Body::Rows(rows) = screen.view().body else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn search_resets_page_and_filters_rows() {
        let mut screen = loaded(25, 10);
        screen.gesture(Gesture::NextPage);
        for ch in "supplier 2".chars() {
            screen.gesture(Gesture::SearchTyped(ch));
        }
        assert_eq!(screen.page(), 1);
        assert_eq!(screen.search(), "supplier 2");
        assert_eq!(screen.filtered().len(), 6);
    }

    #[test]
    fn unmatched_search_offers_clearing() {
        let mut screen = loaded(5, 10);
        for ch in "zzz".chars() {
            screen.gesture(Gesture::SearchTyped(ch));
        }
        let Body::Empty(empty) = screen.view().body else {
            panic!("expected empty state");
        };
        assert!(empty.description.contains("zzz"));
        assert!(empty.clear_search);

        screen.gesture(Gesture::ClearSearchClicked);
        assert_eq!(screen.search(), "");
        assert_eq!(screen.filtered().len(), 5);
    }

    #[test]
    fn chip_narrows_rows_and_clear_resets_it() {
        let mut screen = loaded(6, 10);
        screen.gesture(Gesture::FilterClicked(1));
        assert_eq!(screen.filtered().len(), 3);
        for ch in "01".chars() {
            screen.gesture(Gesture::SearchTyped(ch));
        }
        assert!(screen.filtered().is_empty());

        let effects = screen.gesture(Gesture::ClearSearchClicked);
        assert_eq!(
            effects,
            Some(vec![ScreenEffect::Status(ScreenStatus::SearchCleared)])
        );
        assert_eq!(screen.filtered().len(), 6);
    }

    #[test]
    fn remove_selected_then_reload_from_empty() {
        let mut screen = loaded(3, 10);
        assert_eq!(
            screen.gesture(Gesture::HeaderActionClicked(0)),
            Some(vec![ScreenEffect::Status(ScreenStatus::NothingSelected)])
        );

        screen.gesture(Gesture::AllToggled);
        let effects = screen.gesture(Gesture::HeaderActionClicked(0));
        assert_eq!(
            effects,
            Some(vec![ScreenEffect::Status(ScreenStatus::Removed {
                noun: "supplier",
                count: 3
            })])
        );
        assert!(screen.records().is_empty());
        assert!(screen.selected().is_empty());

        let Body::Empty(empty) = screen.view().body else {
            panic!("expected empty state");
        };
        assert_eq!(empty.add_new.as_deref(), Some("load sample data"));
        assert_eq!(
            screen.gesture(Gesture::AddNewClicked),
            Some(vec![ScreenEffect::Reload])
        );
    }

    #[test]
    fn row_click_reports_the_record() {
        let mut screen = loaded(3, 10);
        screen.move_row(2);
        let effects = screen.gesture(Gesture::RowClicked(2));
        assert_eq!(
            effects.map(|effects| effects
                .into_iter()
                .map(|effect| match effect {
                    ScreenEffect::Status(status) => status.message(),
                    other => format!("{other:?}"),
                })
                .collect::<Vec<_>>()),
            Some(vec!["supplier 3: Supplier 03".to_owned()])
        );
    }

    #[test]
    fn cursor_stays_inside_the_page() {
        let mut screen = loaded(12, 10);
        screen.move_row(50);
        screen.move_column(50);
        assert_eq!(ScreenView::cursor(&screen), (9, 5));

        screen.gesture(Gesture::NextPage);
        assert_eq!(ScreenView::cursor(&screen), (1, 5));
        screen.move_row(-10);
        assert_eq!(ScreenView::cursor(&screen), (0, 5));
    }

    #[test]
    fn status_messages_read_naturally() {
        assert_eq!(
            ScreenStatus::Sorted {
                column: "name".to_owned(),
                direction: SortDirection::Desc
            }
            .message(),
            "sort name desc"
        );
        assert_eq!(
            ScreenStatus::Removed {
                noun: "member",
                count: 1
            }
            .message(),
            "removed 1 member"
        );
        assert_eq!(ScreenStatus::Unavailable("next page").message(), "next page unavailable");
    }
}
