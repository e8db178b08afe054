//! Multi-select filters for the manufacturer catalog.

use super::Manufacturer;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// Attribute a filter value applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterCategory {
    Location,
    Employees,
    Specialties,
    Rating,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 4] = [
        FilterCategory::Location,
        FilterCategory::Employees,
        FilterCategory::Specialties,
        FilterCategory::Rating,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Location => "Location",
            Self::Employees => "Employees",
            Self::Specialties => "Specialties",
            Self::Rating => "Rating",
        }
    }

    /// Values offered in the filter panel
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Location => &["China", "India", "Vietnam", "Bangladesh", "Turkey"],
            Self::Employees => &["1-50", "50-200", "200-500", "500-1000", "1000+"],
            Self::Specialties => &[
                "Apparel",
                "Fashion",
                "Sustainable",
                "Custom Design",
                "Mass Production",
                "Luxury",
            ],
            Self::Rating => &["4.5+", "4.0+", "3.5+", "3.0+"],
        }
    }
}

/// Flattened (category, value) pairs in panel order
pub fn filter_options() -> Vec<(FilterCategory, &'static str)> {
    FilterCategory::ALL
        .iter()
        .flat_map(|c| c.options().iter().map(move |v| (*c, *v)))
        .collect()
}

fn rating_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)?)\+$").expect("valid rating pattern"))
}

/// Parse a rating option such as "4.5+" into its threshold
pub fn rating_threshold(value: &str) -> Option<f32> {
    rating_pattern()
        .captures(value.trim())
        .and_then(|caps| caps[1].parse().ok())
}

/// Selected values per category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: BTreeMap<FilterCategory, BTreeSet<String>>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` if absent, remove it if present
    pub fn toggle(&mut self, category: FilterCategory, value: &str) {
        let values = self.selected.entry(category).or_default();
        if !values.remove(value) {
            values.insert(value.to_string());
        }
        if values.is_empty() {
            self.selected.remove(&category);
        }
    }

    pub fn is_selected(&self, category: FilterCategory, value: &str) -> bool {
        self.selected
            .get(&category)
            .is_some_and(|values| values.contains(value))
    }

    pub fn values(&self, category: FilterCategory) -> impl Iterator<Item = &str> {
        self.selected
            .get(&category)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of selected values across all categories
    pub fn active_count(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// True when, for every category with a selection, the manufacturer's
    /// attribute intersects the selected values
    pub fn matches(&self, manufacturer: &Manufacturer) -> bool {
        self.selected.iter().all(|(category, values)| {
            values
                .iter()
                .any(|value| Self::value_matches(*category, value, manufacturer))
        })
    }

    fn value_matches(category: FilterCategory, value: &str, manufacturer: &Manufacturer) -> bool {
        match category {
            FilterCategory::Location => manufacturer.country().eq_ignore_ascii_case(value),
            FilterCategory::Employees => manufacturer.employees == value,
            FilterCategory::Specialties => manufacturer.has_specialty(value),
            FilterCategory::Rating => {
                rating_threshold(value).is_some_and(|min| manufacturer.rating >= min)
            }
        }
    }
}
