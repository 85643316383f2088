// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl CheckState {
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Unchecked => "[ ]",
            Self::Indeterminate => "[-]",
            Self::Checked => "[x]",
        }
    }
}

pub type RowIdFn<R, Id> = Box<dyn Fn(&R) -> Id>;

/// Selection descriptor for one render. The set is borrowed from the caller
/// and never modified; every operation returns a fresh set.
pub struct Selectable<'a, R, Id> {
    selected_rows: &'a BTreeSet<Id>,
    get_row_id: RowIdFn<R, Id>,
    all_data: Option<&'a [R]>,
}

impl<'a, R, Id: Ord + Clone> Selectable<'a, R, Id> {
    pub fn new<F>(selected_rows: &'a BTreeSet<Id>, get_row_id: F) -> Self
    where
        F: Fn(&R) -> Id + 'static,
    {
        Self {
            selected_rows,
            get_row_id: Box::new(get_row_id),
            all_data: None,
        }
    }

    pub fn with_all_data(mut self, all_data: &'a [R]) -> Self {
        self.all_data = Some(all_data);
        self
    }

    pub fn row_id(&self, record: &R) -> Id {
        (self.get_row_id)(record)
    }

    pub fn is_selected(&self, record: &R) -> bool {
        self.selected_rows.contains(&self.row_id(record))
    }

    pub fn toggle_row(&self, id: Id) -> BTreeSet<Id> {
        let mut next = self.selected_rows.clone();
        if !next.remove(&id) {
            next.insert(id);
        }
        next
    }

    pub fn toggle_all(&self, data: &[R]) -> BTreeSet<Id> {
        let universe = self.universe_ids(data);
        if universe.is_subset(self.selected_rows) {
            BTreeSet::new()
        } else {
            universe
        }
    }

    pub fn header_state(&self, data: &[R]) -> CheckState {
        let universe = self.universe_ids(data);
        let selected = universe
            .iter()
            .filter(|id| self.selected_rows.contains(id))
            .count();
        if selected == 0 {
            CheckState::Unchecked
        } else if selected == universe.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    fn universe_ids(&self, data: &[R]) -> BTreeSet<Id> {
        self.all_data
            .unwrap_or(data)
            .iter()
            .map(|record| self.row_id(record))
            .collect()
    }
}

impl<R, Id: fmt::Debug> fmt::Debug for Selectable<'_, R, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selectable")
            .field("selected_rows", &self.selected_rows)
            .field("all_data", &self.all_data.map(<[R]>::len))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{CheckState, Selectable};
    use std::collections::BTreeSet;

    #[derive(Debug)]
    struct Plot {
        id: u32,
    }

    fn plots(ids: &[u32]) -> Vec<Plot> {
        ids.iter().map(|id| Plot { id: *id }).collect()
    }

    fn ids(values: &[u32]) -> BTreeSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn toggling_a_row_twice_restores_membership() {
        let original = ids(&[2, 5]);
        let selection = Selectable::new(&original, |plot: &Plot| plot.id);
        let once = selection.toggle_row(9);
        assert_eq!(once, ids(&[2, 5, 9]));

        let again = Selectable::new(&once, |plot: &Plot| plot.id).toggle_row(9);
        assert_eq!(again, original);
        assert_eq!(original, ids(&[2, 5]));
    }

    #[test]
    fn select_all_uses_all_data_when_supplied() {
        let page = plots(&[1, 2, 3]);
        let everything = plots(&[1, 2, 3, 4, 5]);
        let selected = BTreeSet::new();
        let selection = Selectable::new(&selected, |plot: &Plot| plot.id).with_all_data(&everything);

        assert_eq!(selection.toggle_all(&page), ids(&[1, 2, 3, 4, 5]));
    }

    #[test]
    fn select_all_falls_back_to_rendered_rows() {
        let page = plots(&[1, 2, 3]);
        let selected = ids(&[7]);
        let selection = Selectable::new(&selected, |plot: &Plot| plot.id);
        assert_eq!(selection.toggle_all(&page), ids(&[1, 2, 3]));
    }

    #[test]
    fn deselect_all_from_full_selection_is_empty() {
        let page = plots(&[1, 2]);
        let everything = plots(&[1, 2, 3]);
        let selected = ids(&[1, 2, 3]);
        let selection = Selectable::new(&selected, |plot: &Plot| plot.id).with_all_data(&everything);
        assert!(selection.toggle_all(&page).is_empty());
    }

    #[test]
    fn header_state_tracks_universe_coverage() {
        let page = plots(&[1, 2]);
        let everything = plots(&[1, 2, 3, 4]);

        let none = BTreeSet::new();
        let some = ids(&[1, 4]);
        let all = ids(&[1, 2, 3, 4]);
        let outside = ids(&[99]);

        let state = |selected: &BTreeSet<u32>| {
            Selectable::new(selected, |plot: &Plot| plot.id)
                .with_all_data(&everything)
                .header_state(&page)
        };
        assert_eq!(state(&none), CheckState::Unchecked);
        assert_eq!(state(&some), CheckState::Indeterminate);
        assert_eq!(state(&all), CheckState::Checked);
        assert_eq!(state(&outside), CheckState::Unchecked);
    }

    #[test]
    fn indeterminate_iff_partial_intersection() {
        let universe = plots(&[1, 2, 3]);
        let candidates: [&[u32]; 6] = [&[], &[1], &[1, 2], &[1, 2, 3], &[3, 8], &[8, 9]];
        for candidate in candidates {
            let selected = ids(candidate);
            let selection = Selectable::new(&selected, |plot: &Plot| plot.id);
            let overlap = universe
                .iter()
                .filter(|plot| selected.contains(&plot.id))
                .count();
            let expected = overlap > 0 && overlap < universe.len();
            assert_eq!(
                selection.header_state(&universe) == CheckState::Indeterminate,
                expected,
                "selection {candidate:?}"
            );
        }
    }

    #[test]
    fn duplicate_ids_collapse_to_one_member() {
        let page = plots(&[4, 4, 6]);
        let selected = BTreeSet::new();
        let selection = Selectable::new(&selected, |plot: &Plot| plot.id);
        assert_eq!(selection.toggle_all(&page), ids(&[4, 6]));
    }
}
