//! Manufacturer catalog with incremental loading and client-side filters.
//!
//! Loading is split into `begin_load` and `complete_load` so the fetch can
//! happen after a delay without blocking the event loop. The in-flight flag
//! guarantees at most one outstanding load.

use crate::config::CatalogConfig;
use crate::domain::{manufacturer, FilterCategory, FilterSelection, Manufacturer, ManufacturerId};
use crate::error::CatalogError;

/// Where catalog records come from
pub trait ManufacturerSource {
    /// Fetch up to `limit` records starting at `offset`
    fn fetch(&self, offset: usize, limit: usize) -> Vec<Manufacturer>;
}

/// Cycles the embedded reference records, giving each copy a distinct id
#[derive(Debug, Clone)]
pub struct FixtureSource {
    records: Vec<Manufacturer>,
}

impl FixtureSource {
    pub fn embedded() -> Result<Self, CatalogError> {
        Ok(Self::new(manufacturer::load_fixtures()?))
    }

    pub fn new(records: Vec<Manufacturer>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ManufacturerSource for FixtureSource {
    fn fetch(&self, offset: usize, limit: usize) -> Vec<Manufacturer> {
        if self.records.is_empty() {
            return Vec::new();
        }
        (offset..offset + limit)
            .map(|position| {
                let mut record = self.records[position % self.records.len()].clone();
                record.id = ManufacturerId(position as u32 + 1);
                // Only the first pass through the list carries recommendations
                record.suggested &= position < self.records.len();
                record
            })
            .collect()
    }
}

/// A pending load handed out by `begin_load`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRequest {
    pub offset: usize,
    pub limit: usize,
}

/// The growing, filterable manufacturer list
#[derive(Debug, Clone)]
pub struct ManufacturerCatalog {
    items: Vec<Manufacturer>,
    loading: bool,
    has_more: bool,
    batch_size: usize,
    max_items: usize,
    prefetch_margin: usize,
    filters: FilterSelection,
}

impl ManufacturerCatalog {
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            has_more: config.max_items > 0,
            batch_size: config.batch_size.max(1),
            max_items: config.max_items,
            prefetch_margin: config.prefetch_margin,
            filters: FilterSelection::new(),
        }
    }

    pub fn items(&self) -> &[Manufacturer] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn get(&self, id: ManufacturerId) -> Option<&Manufacturer> {
        self.items.iter().find(|m| m.id == id)
    }

    /// Claim the next batch. Returns `None` while a load is in flight or once
    /// the catalog is exhausted.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        if self.loading || !self.has_more {
            return None;
        }
        self.loading = true;
        let remaining = self.max_items.saturating_sub(self.items.len());
        let request = LoadRequest {
            offset: self.items.len(),
            limit: self.batch_size.min(remaining),
        };
        tracing::debug!(offset = request.offset, limit = request.limit, "catalog load started");
        Some(request)
    }

    /// Append a fetched batch and release the in-flight flag
    pub fn complete_load(&mut self, request: LoadRequest, batch: Vec<Manufacturer>) {
        if !self.loading || request.offset != self.items.len() {
            tracing::warn!(offset = request.offset, "discarding unexpected catalog batch");
            return;
        }
        let received = batch.len();
        self.items.extend(batch.into_iter().take(request.limit));
        self.items.truncate(self.max_items);
        self.loading = false;
        if received == 0 || self.items.len() >= self.max_items {
            self.has_more = false;
        }
        tracing::debug!(
            total = self.items.len(),
            has_more = self.has_more,
            "catalog load completed"
        );
    }

    /// Release the in-flight flag without appending, e.g. after teardown
    pub fn abort_load(&mut self) {
        self.loading = false;
    }

    /// Fetch the next batch synchronously. Returns the number appended.
    pub fn load_more(&mut self, source: &dyn ManufacturerSource) -> usize {
        let Some(request) = self.begin_load() else {
            return 0;
        };
        let before = self.items.len();
        self.complete_load(request, source.fetch(request.offset, request.limit));
        self.items.len() - before
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) {
        self.filters.toggle(category, value);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Loaded records passing the current filters, in load order
    pub fn visible(&self) -> Vec<&Manufacturer> {
        self.items
            .iter()
            .filter(|m| self.filters.matches(m))
            .collect()
    }

    /// True when `selected` (an index into `visible()`) is close enough to
    /// the end that the next batch should be requested
    pub fn should_prefetch(&self, selected: usize) -> bool {
        if self.loading || !self.has_more {
            return false;
        }
        let visible = self.visible().len();
        visible == 0 || selected + self.prefetch_margin + 1 >= visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manufacturer::sample;

    fn config(batch_size: usize, max_items: usize) -> CatalogConfig {
        CatalogConfig {
            batch_size,
            max_items,
            load_delay_ms: 0,
            prefetch_margin: 1,
        }
    }

    fn source() -> FixtureSource {
        FixtureSource::new(vec![
            sample("Alpha", "Guangzhou, China", 4.8, &["Apparel"]),
            sample("Beta", "Istanbul, Turkey", 4.1, &["Denim"]),
            sample("Gamma", "Bangalore, India", 3.6, &["Sustainable"]),
        ])
    }

    #[test]
    fn test_second_begin_while_in_flight_is_refused() {
        let mut catalog = ManufacturerCatalog::new(&config(4, 20));
        let first = catalog.begin_load().unwrap();
        assert!(catalog.begin_load().is_none());

        catalog.complete_load(first, source().fetch(first.offset, first.limit));
        assert_eq!(catalog.items().len(), 4);
        assert!(!catalog.is_loading());
    }

    #[test]
    fn test_load_appends_in_order_with_distinct_ids() {
        let mut catalog = ManufacturerCatalog::new(&config(2, 20));
        let src = source();
        catalog.load_more(&src);
        catalog.load_more(&src);

        let names: Vec<&str> = catalog.items().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma", "Alpha"]);
        let ids: Vec<u32> = catalog.items().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_stops_at_cap() {
        let mut catalog = ManufacturerCatalog::new(&config(4, 6));
        let src = source();
        assert_eq!(catalog.load_more(&src), 4);
        assert_eq!(catalog.load_more(&src), 2);
        assert!(!catalog.has_more());
        assert_eq!(catalog.load_more(&src), 0);
        assert_eq!(catalog.items().len(), 6);
    }

    #[test]
    fn test_empty_source_ends_catalog() {
        let mut catalog = ManufacturerCatalog::new(&config(4, 20));
        assert_eq!(catalog.load_more(&FixtureSource::new(Vec::new())), 0);
        assert!(!catalog.has_more());
    }

    #[test]
    fn test_stale_batch_is_discarded() {
        let mut catalog = ManufacturerCatalog::new(&config(2, 20));
        let request = catalog.begin_load().unwrap();
        catalog.abort_load();
        catalog.complete_load(request, source().fetch(0, 2));
        assert!(catalog.items().is_empty());
    }

    #[test]
    fn test_filters_narrow_visible_items() {
        let mut catalog = ManufacturerCatalog::new(&config(3, 20));
        catalog.load_more(&source());

        catalog.toggle_filter(FilterCategory::Location, "Turkey");
        let visible: Vec<&str> = catalog.visible().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(visible, vec!["Beta"]);

        catalog.toggle_filter(FilterCategory::Location, "Vietnam");
        catalog.toggle_filter(FilterCategory::Location, "Turkey");
        assert!(catalog.visible().is_empty());
        // Filtering never touches the loaded list
        assert_eq!(catalog.items().len(), 3);
    }

    #[test]
    fn test_prefetch_near_bottom() {
        let mut catalog = ManufacturerCatalog::new(&config(4, 20));
        assert!(catalog.should_prefetch(0));
        catalog.load_more(&source());

        assert!(!catalog.should_prefetch(0));
        assert!(catalog.should_prefetch(2));
        assert!(catalog.should_prefetch(3));
    }

    #[test]
    fn test_embedded_source_loads() {
        let src = FixtureSource::embedded().unwrap();
        assert!(!src.is_empty());
        let batch = src.fetch(0, src.len() + 1);
        assert!(!batch.last().unwrap().suggested);
    }
}
