use crate::filter::filter_monkeys;
use crate::models::{Monkey, MonkeyId, SpeciesFilter};

/// Records held by the view plus the search and species filter applied to
/// them. `visible` is re-derived whenever any of the inputs change.
#[derive(Debug, Default)]
pub(crate) struct CatalogScreen {
    pub(crate) monkeys: Vec<Monkey>,
    pub(crate) visible: Vec<Monkey>,
    pub(crate) search: String,
    pub(crate) species: SpeciesFilter,
    pub(crate) selected: usize,
}

impl CatalogScreen {
    pub(crate) fn new(monkeys: Vec<Monkey>) -> Self {
        let mut screen = Self {
            monkeys,
            ..Self::default()
        };
        screen.apply_filter();
        screen
    }

    fn apply_filter(&mut self) {
        self.visible = filter_monkeys(&self.monkeys, &self.search, self.species);
        self.ensure_in_bounds();
    }

    pub(crate) fn set_monkeys(&mut self, monkeys: Vec<Monkey>) {
        self.monkeys = monkeys;
        self.apply_filter();
    }

    pub(crate) fn set_search(&mut self, search: String) {
        self.search = search;
        self.selected = 0;
        self.apply_filter();
    }

    pub(crate) fn push_search_char(&mut self, ch: char) {
        let mut search = self.search.clone();
        search.push(ch);
        self.set_search(search);
    }

    pub(crate) fn pop_search_char(&mut self) {
        let mut search = self.search.clone();
        search.pop();
        self.set_search(search);
    }

    pub(crate) fn set_species_filter(&mut self, species: SpeciesFilter) {
        self.species = species;
        self.selected = 0;
        self.apply_filter();
    }

    /// Select the visible card for `id`, if the filters let it through.
    pub(crate) fn focus(&mut self, id: MonkeyId) -> bool {
        match self.visible.iter().position(|monkey| monkey.id == id) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub(crate) fn current_monkey(&self) -> Option<&Monkey> {
        self.visible.get(self.selected)
    }

    /// Move the selection by `offset` cards, ignoring moves that would leave
    /// the grid.
    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.visible.is_empty() {
            return;
        }
        let new_index = self.selected as isize + offset;
        if (0..self.visible.len() as isize).contains(&new_index) {
            self.selected = new_index as usize;
        }
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.visible.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.visible.len() {
            self.selected = self.visible.len() - 1;
        }
    }
}

/// Popup list backing the species dropdown.
#[derive(Debug)]
pub(crate) struct SpeciesPicker {
    pub(crate) options: Vec<SpeciesFilter>,
    pub(crate) selected: usize,
}

impl SpeciesPicker {
    /// Open with the currently applied filter highlighted.
    pub(crate) fn new(current: SpeciesFilter) -> Self {
        let options = SpeciesFilter::options();
        let selected = options
            .iter()
            .position(|option| *option == current)
            .unwrap_or(0);
        Self { options, selected }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        let len = self.options.len() as isize;
        let new_index = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new_index as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.options.len().saturating_sub(1);
    }

    pub(crate) fn current(&self) -> SpeciesFilter {
        self.options
            .get(self.selected)
            .copied()
            .unwrap_or_default()
    }
}
