// ABOUTME: Store section ordering and display names for grocery lists
// ABOUTME: Fixed priority table with unknown sections sorted alphabetically at the end
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use std::cmp::Ordering;

/// Shopping order of well-known store sections, matched case-insensitively
pub const SECTION_PRIORITY: &[&str] = &[
    "produce",
    "dairy",
    "meat",
    "seafood",
    "deli",
    "bakery",
    "frozen",
    "pantry",
    "canned goods",
    "grains",
    "baking",
    "spices",
    "condiments",
    "snacks",
    "beverages",
    "international",
    "other",
];

/// Position of a section in [`SECTION_PRIORITY`], `None` for unknown sections
#[must_use]
pub fn section_rank(section: &str) -> Option<usize> {
    let section = section.trim();
    SECTION_PRIORITY
        .iter()
        .position(|known| known.eq_ignore_ascii_case(section))
}

/// Compare two sections in shopping order
///
/// Known sections follow the priority table. Unknown sections come after all
/// known ones, alphabetically (case-insensitive, ties broken by raw bytes).
#[must_use]
pub fn compare_sections(a: &str, b: &str) -> Ordering {
    match (section_rank(a), section_rank(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b)),
    }
}

/// Sort section names into shopping order
pub fn ordered_sections<'a, I>(sections: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<String> = sections.into_iter().map(str::to_owned).collect();
    names.sort_by(|a, b| compare_sections(a, b));
    names.dedup();
    names
}

/// Title-case a section name for display (`"canned goods"` → `"Canned Goods"`)
#[must_use]
pub fn format_section_name(section: &str) -> String {
    section
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
