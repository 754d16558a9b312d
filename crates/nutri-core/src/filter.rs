//! Group filtering over the food table.
//!
//! Everything here is pure and total: an empty table or an empty filter
//! yields an empty or full list, never an error.

use std::collections::BTreeSet;

use nutri_model::FoodTable;

/// Sorted distinct food names whose group is in `groups`.
///
/// An empty `groups` set means "no filter" and returns every name.
pub fn foods_in_groups(table: &FoodTable, groups: &BTreeSet<String>) -> Vec<String> {
    if groups.is_empty() {
        return table.food_names();
    }
    let names: BTreeSet<&str> = table
        .iter()
        .filter(|row| groups.contains(row.group()))
        .map(|row| row.food())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Whether `name` is an exact food name in the table.
pub fn exists(table: &FoodTable, name: &str) -> bool {
    table.contains(name)
}

/// Sorted food names containing `term`, ignoring case. A blank term matches
/// every name.
pub fn search_foods(table: &FoodTable, term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return table.food_names();
    }
    let mut names: Vec<String> = table
        .iter()
        .filter(|row| row.food().to_lowercase().contains(&needle))
        .map(|row| row.food().to_string())
        .collect();
    names.sort();
    names
}

/// The table's spelling of a food name, matched ignoring case.
pub fn canonical_food<'a>(table: &'a FoodTable, name: &str) -> Option<&'a str> {
    let name = name.trim();
    if let Some(row) = table.row_by_food(name) {
        return Some(row.food());
    }
    let needle = name.to_lowercase();
    table
        .iter()
        .map(|row| row.food())
        .find(|food| food.to_lowercase() == needle)
}

/// The table's spelling of a group label, matched ignoring case.
pub fn canonical_group(table: &FoodTable, name: &str) -> Option<String> {
    let needle = name.trim().to_lowercase();
    table
        .groups()
        .into_iter()
        .find(|group| group.to_lowercase() == needle)
}
