//! Category classification by ordered substring rules
//!
//! Free-text status values from upstream ("Submitted - awaiting info",
//! "READ", "1", "in progress") are reduced to one label of a small closed
//! enumeration. A [`RuleTable`] is evaluated top to bottom and the first
//! matching rule wins, so overlapping keywords resolve strictly by
//! declaration order. Blank input short-circuits to the table's default
//! without evaluating any rule.
//!
//! # Examples
//!
//! ```
//! use fop_common::classify::{classify, tables, ReadState};
//! use serde_json::json;
//!
//! assert_eq!(classify(Some(&json!("Unread")), &tables::READ_STATE), ReadState::Unread);
//! assert_eq!(classify(Some(&json!("true")), &tables::READ_STATE), ReadState::Read);
//! assert_eq!(classify(None, &tables::READ_STATE), ReadState::Unread);
//! ```

mod labels;
pub mod tables;

pub use labels::{QueueItemType, ReadState, ReportStatus, RequestStatus};

use serde_json::Value;
use std::fmt::Debug;
use std::hash::Hash;

use crate::resolve::coerce_text;

/// One member of a closed category enumeration
pub trait CategoryLabel: Copy + Eq + Hash + Debug + 'static {
    /// Every member in declaration order
    const ALL: &'static [Self];

    /// Display label (e.g. "In Progress")
    fn as_str(&self) -> &'static str;

    /// Case-insensitive comparison against a filter value
    fn matches_filter(&self, filter: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(filter.trim())
    }
}

/// Predicate over lowercased, trimmed text
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Text contains any keyword as a substring
    Contains(&'static [&'static str]),
    /// Text equals any value exactly
    Exact(&'static [&'static str]),
}

impl Matcher {
    /// Evaluate against text that is already lowercased and trimmed
    ///
    /// Keywords may be written in any case.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Contains(keywords) => {
                keywords.iter().any(|k| text.contains(k.to_lowercase().as_str()))
            }
            Matcher::Exact(values) => values.iter().any(|v| v.to_lowercase() == text),
        }
    }
}

/// A (predicate, label) pair
#[derive(Debug, Clone, Copy)]
pub struct Rule<L> {
    pub matcher: Matcher,
    pub label: L,
}

impl<L> Rule<L> {
    /// Substring rule
    pub const fn contains(keywords: &'static [&'static str], label: L) -> Self {
        Self {
            matcher: Matcher::Contains(keywords),
            label,
        }
    }

    /// Whole-text rule
    pub const fn exact(values: &'static [&'static str], label: L) -> Self {
        Self {
            matcher: Matcher::Exact(values),
            label,
        }
    }
}

/// Ordered rules for one enumeration plus its single default label
#[derive(Debug, Clone, Copy)]
pub struct RuleTable<L: 'static> {
    pub rules: &'static [Rule<L>],
    pub default: L,
}

impl<L: CategoryLabel> RuleTable<L> {
    pub const fn new(rules: &'static [Rule<L>], default: L) -> Self {
        Self { rules, default }
    }

    /// Classify already-coerced text
    pub fn classify_text(&self, raw: &str) -> L {
        let text = raw.trim().to_lowercase();
        if text.is_empty() {
            return self.default;
        }
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(&text))
            .map(|rule| rule.label)
            .unwrap_or(self.default)
    }
}

/// Classify a raw record value against a rule table
pub fn classify<L: CategoryLabel>(raw: Option<&Value>, table: &RuleTable<L>) -> L {
    table.classify_text(&coerce_text(raw))
}
