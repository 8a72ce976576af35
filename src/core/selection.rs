use crate::core::projection::{project, search_by_name};
use crate::core::{Catalog, Listing, ProjectedItem, Selector};
use crate::utils::error::{DirectoryError, Result};

/// The detail panel state: nothing chosen, or one projected item.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    NoSelection,
    Selected(ProjectedItem<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::NoSelection
    }
}

impl<T> Selection<T> {
    /// Replaces any previous selection and returns the newly chosen item.
    pub fn choose(&mut self, item: ProjectedItem<T>) -> &ProjectedItem<T> {
        *self = Selection::Selected(item);
        match self {
            Selection::Selected(item) => item,
            Selection::NoSelection => unreachable!("selection was just set"),
        }
    }

    pub fn clear(&mut self) {
        *self = Selection::NoSelection;
    }

    pub fn current(&self) -> Option<&ProjectedItem<T>> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(item) => Some(item),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

/// Per-user browsing state. Owned by the caller; nothing here is global.
#[derive(Debug, Clone)]
pub struct Session<T> {
    region: Selector,
    category: Selector,
    name_filter: Option<String>,
    selection: Selection<T>,
}

impl<T> Default for Session<T> {
    fn default() -> Self {
        Self {
            region: Selector::All,
            category: Selector::All,
            name_filter: None,
            selection: Selection::NoSelection,
        }
    }
}

impl<T: Listing> Session<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> &Selector {
        &self.region
    }

    pub fn category(&self) -> &Selector {
        &self.category
    }

    pub fn name_filter(&self) -> Option<&str> {
        self.name_filter.as_deref()
    }

    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    /// The category selector depends on the region, so both it and the selection reset.
    pub fn set_region(&mut self, region: Selector) {
        if self.region != region {
            self.region = region;
            self.category = Selector::All;
            self.selection.clear();
        }
    }

    pub fn set_category(&mut self, category: Selector) {
        self.category = category;
    }

    pub fn set_name_filter(&mut self, needle: Option<String>) {
        self.name_filter = needle
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
    }

    /// Current list under the session's selectors and name filter.
    pub fn results(&self, catalog: &Catalog<T>) -> Vec<ProjectedItem<T>> {
        let items = project(catalog, &self.region, &self.category);
        match &self.name_filter {
            Some(needle) => search_by_name(items, needle),
            None => items,
        }
    }

    pub fn choose(&mut self, item: ProjectedItem<T>) {
        self.selection.choose(item);
    }

    /// Chooses the entry at zero-based `index` of the current results.
    pub fn choose_index(&mut self, catalog: &Catalog<T>, index: usize) -> Result<&ProjectedItem<T>> {
        let mut results = self.results(catalog);
        if index >= results.len() {
            return Err(DirectoryError::SelectionOutOfRange {
                index: index + 1,
                len: results.len(),
            });
        }
        Ok(self.selection.choose(results.swap_remove(index)))
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }
}
