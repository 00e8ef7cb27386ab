//! List derivation pipeline
//!
//! Every portal list screen derives what it shows the same way:
//!
//! 1. Partition by ownership when the view mode is [`ViewMode::Mine`]
//! 2. Classify each record's status and parse its date into a sort key
//! 3. Filter by status, secondary filter and search query
//! 4. Sort by date (newest first by default, stable for ties)
//! 5. Count: `total` and per-category pill counts before query/status
//!    filtering, `showing` after
//! 6. Truncate to the display cap (counts are unaffected)
//!
//! Records are borrowed, never mutated or copied. A malformed record degrades
//! to blank fields and the table's default label; it is still counted.
//!
//! # Examples
//!
//! ```
//! use fop_common::bus::{ViewState, ViewStatePatch};
//! use fop_common::classify::{tables, RequestStatus};
//! use fop_common::pipeline::ListPipeline;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({ "Title": "Boots", "Status": "Approved", "Created": "2024-02-01" }),
//!     json!({ "Title": "Gloves", "Status": "Open", "Created": "2024-03-01" }),
//! ];
//! let pipeline = ListPipeline::new(&tables::REQUEST_STATUS)
//!     .status_fields(&["Status"])
//!     .date_fields(&["Created"]);
//!
//! let state = ViewState::default().with(&ViewStatePatch::status("Open"));
//! let list = pipeline.derive(&records, &state);
//! assert_eq!(list.total, 2);
//! assert_eq!(list.showing, 1);
//! assert_eq!(list.counts.get(RequestStatus::Approved), 1);
//! ```

pub mod dates;
mod owner;

pub use owner::{Identity, OwnerMatch};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::bus::{is_filter_all, ViewMode, ViewState};
use crate::classify::{classify, CategoryLabel, RuleTable};
use crate::resolve::{coerce_text, probe_all, resolve, resolve_text};

/// Default display cap for list screens
pub const DEFAULT_MAX_ITEMS: usize = 40;

/// Date ordering of the displayed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Which set `total` and the category counts are computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalScope {
    /// After ownership partitioning (before query/status filters)
    #[default]
    Partitioned,
    /// The whole collection, ignoring the view mode
    Unfiltered,
}

type TextExtractor = Box<dyn Fn(&Value) -> String + Send + Sync>;
type OwnerPredicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Per-category counts in the enumeration's declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCounts<L: CategoryLabel> {
    entries: Vec<(L, usize)>,
}

impl<L: CategoryLabel> CategoryCounts<L> {
    fn zeroed() -> Self {
        Self {
            entries: L::ALL.iter().map(|label| (*label, 0)).collect(),
        }
    }

    fn bump(&mut self, label: L) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == label) {
            entry.1 += 1;
        }
    }

    pub fn get(&self, label: L) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (L, usize)> + '_ {
        self.entries.iter().copied()
    }
}

/// One record as placed in a derived list
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedItem<'a, L> {
    /// Position in the input collection
    pub index: usize,
    pub record: &'a Value,
    pub status: L,
    /// Sort key; `None` sorts as earliest
    pub instant: Option<DateTime<Utc>>,
}

/// Result of one derivation
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedList<'a, L: CategoryLabel> {
    /// Records in the counting scope (pill total)
    pub total: usize,
    /// Per-category counts over the counting scope
    pub counts: CategoryCounts<L>,
    /// Records passing every filter, before truncation
    pub showing: usize,
    /// Ordered, truncated records to display
    pub items: Vec<DerivedItem<'a, L>>,
}

impl<'a, L: CategoryLabel> DerivedList<'a, L> {
    /// True when the empty state should be shown
    pub fn is_empty(&self) -> bool {
        self.showing == 0
    }

    /// True when `items` was cut at the display cap
    pub fn is_truncated(&self) -> bool {
        self.items.len() < self.showing
    }
}

/// Configured derivation for one screen
pub struct ListPipeline<L: CategoryLabel> {
    table: &'static RuleTable<L>,
    status_fields: &'static [&'static str],
    date_fields: &'static [&'static str],
    search: Option<TextExtractor>,
    secondary: Option<TextExtractor>,
    owner: Option<OwnerPredicate>,
    sort_order: SortOrder,
    max_items: usize,
    total_scope: TotalScope,
}

impl<L: CategoryLabel> ListPipeline<L> {
    pub fn new(table: &'static RuleTable<L>) -> Self {
        Self {
            table,
            status_fields: &[],
            date_fields: &[],
            search: None,
            secondary: None,
            owner: None,
            sort_order: SortOrder::default(),
            max_items: DEFAULT_MAX_ITEMS,
            total_scope: TotalScope::default(),
        }
    }

    /// Candidate fields holding the free-text status
    pub fn status_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.status_fields = fields;
        self
    }

    /// Candidate fields holding the sort date
    pub fn date_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.date_fields = fields;
        self
    }

    /// Custom search-blob extractor
    pub fn search_with<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.search = Some(Box::new(extractor));
        self
    }

    /// Search blob made of one resolved value per candidate list
    pub fn search_fields(self, lists: &'static [&'static [&'static str]]) -> Self {
        self.search_with(move |record| {
            lists
                .iter()
                .map(|candidates| resolve_text(record, candidates))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// Extractor compared against the secondary filter
    pub fn secondary_with<F>(mut self, extractor: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.secondary = Some(Box::new(extractor));
        self
    }

    /// Identity predicate used when the view mode is `Mine`
    ///
    /// Without one, `Mine` behaves like `All`.
    pub fn owned_by<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.owner = Some(Box::new(predicate));
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn total_scope(mut self, scope: TotalScope) -> Self {
        self.total_scope = scope;
        self
    }

    pub fn table(&self) -> &'static RuleTable<L> {
        self.table
    }

    /// Classify one record's status
    pub fn status_of(&self, record: &Value) -> L {
        classify(resolve(record, self.status_fields), self.table)
    }

    /// First date candidate that resolves and parses
    pub fn instant_of(&self, record: &Value) -> Option<DateTime<Utc>> {
        self.date_fields
            .iter()
            .find_map(|name| dates::parse_instant(probe_all(record, name)))
    }

    /// Run the pipeline over `records` under `state`
    pub fn derive<'a>(&self, records: &'a [Value], state: &ViewState) -> DerivedList<'a, L> {
        let partitioned: Vec<(usize, &'a Value)> = records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.in_partition(record, state.view_mode))
            .collect();

        let classified: Vec<DerivedItem<'a, L>> = partitioned
            .iter()
            .map(|&(index, record)| DerivedItem {
                index,
                record,
                status: self.status_of(record),
                instant: self.instant_of(record),
            })
            .collect();

        let mut counts = CategoryCounts::zeroed();
        let total = match self.total_scope {
            TotalScope::Partitioned => {
                classified.iter().for_each(|item| counts.bump(item.status));
                classified.len()
            }
            TotalScope::Unfiltered => {
                records.iter().for_each(|record| counts.bump(self.status_of(record)));
                records.len()
            }
        };

        let query = state.query.trim().to_lowercase();
        let mut filtered: Vec<DerivedItem<'a, L>> = classified
            .into_iter()
            .filter(|item| {
                is_filter_all(&state.status_filter)
                    || item.status.matches_filter(&state.status_filter)
            })
            .filter(|item| self.passes_secondary(item.record, &state.secondary_filter))
            .filter(|item| {
                query.is_empty() || self.search_blob(item.record).to_lowercase().contains(&query)
            })
            .collect();

        // sort_by is stable: equal instants keep input order
        match self.sort_order {
            SortOrder::NewestFirst => filtered.sort_by(|a, b| b.instant.cmp(&a.instant)),
            SortOrder::OldestFirst => filtered.sort_by(|a, b| a.instant.cmp(&b.instant)),
        }

        let showing = filtered.len();
        filtered.truncate(self.max_items);

        debug!(
            total,
            showing,
            displayed = filtered.len(),
            query = %state.query,
            status = %state.status_filter,
            "List derived"
        );

        DerivedList {
            total,
            counts,
            showing,
            items: filtered,
        }
    }

    fn in_partition(&self, record: &Value, mode: ViewMode) -> bool {
        match (mode, &self.owner) {
            (ViewMode::Mine, Some(is_owner)) => is_owner(record),
            _ => true,
        }
    }

    fn passes_secondary(&self, record: &Value, filter: &str) -> bool {
        if is_filter_all(filter) {
            return true;
        }
        match &self.secondary {
            Some(extract) => extract(record).trim().eq_ignore_ascii_case(filter.trim()),
            None => true,
        }
    }

    fn search_blob(&self, record: &Value) -> String {
        match &self.search {
            Some(extract) => extract(record),
            None => default_search_blob(record),
        }
    }
}

/// All scalar leaf values of a record joined by spaces
pub fn default_search_blob(record: &Value) -> String {
    fn collect(value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Array(items) => items.iter().for_each(|v| collect(v, out)),
            Value::Object(map) => map.values().for_each(|v| collect(v, out)),
            Value::Null => {}
            scalar => out.push(coerce_text(Some(scalar))),
        }
    }
    let mut parts = Vec::new();
    collect(record, &mut parts);
    parts.join(" ")
}
