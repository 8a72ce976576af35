use crate::core::{Catalog, CategoryEntry, Listing, ProjectedItem, RegionEntry, Selector};

fn selected_regions<'a, T>(
    catalog: &'a Catalog<T>,
    region: &'a Selector,
) -> impl Iterator<Item = &'a RegionEntry<T>> + 'a {
    catalog.regions().iter().filter(move |r| region.matches(&r.name))
}

fn selected_categories<'a, T>(
    entry: &'a RegionEntry<T>,
    category: &'a Selector,
) -> impl Iterator<Item = &'a CategoryEntry<T>> + 'a {
    entry.categories.iter().filter(move |c| category.matches(&c.name))
}

/// Flattens the catalog under the two selectors, in region, category, item order.
/// Unknown names yield an empty list.
pub fn project<T: Clone>(
    catalog: &Catalog<T>,
    region: &Selector,
    category: &Selector,
) -> Vec<ProjectedItem<T>> {
    let mut projected = Vec::new();
    for entry in selected_regions(catalog, region) {
        for category_entry in selected_categories(entry, category) {
            projected.extend(category_entry.items.iter().map(|item| ProjectedItem {
                region: entry.name.clone(),
                category: category_entry.name.clone(),
                item: item.clone(),
            }));
        }
    }
    projected
}

/// Keeps items whose name contains `needle`, ignoring case and surrounding whitespace.
pub fn search_by_name<T: Listing>(
    items: Vec<ProjectedItem<T>>,
    needle: &str,
) -> Vec<ProjectedItem<T>> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|projected| projected.item.name().to_lowercase().contains(&needle))
        .collect()
}

/// Region names for the region selector.
pub fn regions<T>(catalog: &Catalog<T>) -> Vec<&str> {
    catalog.regions().iter().map(|r| r.name.as_str()).collect()
}

/// Category names available under the region selector, first-seen order, no duplicates.
pub fn categories<'a, T>(catalog: &'a Catalog<T>, region: &'a Selector) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::new();
    for entry in selected_regions(catalog, region) {
        for category_entry in &entry.categories {
            if !names.contains(&category_entry.name.as_str()) {
                names.push(&category_entry.name);
            }
        }
    }
    names
}

/// Item count per category summed over the selected regions, first-seen order.
pub fn category_counts<T>(catalog: &Catalog<T>, region: &Selector) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in selected_regions(catalog, region) {
        for category_entry in &entry.categories {
            match counts.iter_mut().find(|(name, _)| *name == category_entry.name) {
                Some((_, count)) => *count += category_entry.items.len(),
                None => counts.push((category_entry.name.clone(), category_entry.items.len())),
            }
        }
    }
    counts
}
