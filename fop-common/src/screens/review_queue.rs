//! Supervisor review queue
//!
//! Items of every kind waiting for a decision. The pills count item types
//! across the whole queue regardless of view mode; "mine" narrows the list to
//! items the supervisor submitted.

use crate::classify::{tables, QueueItemType};
use crate::pipeline::{Identity, ListPipeline, TotalScope};

pub const SCHEMA_VERSION: u32 = 2;

pub const TITLE: &[&str] = &["Title", "Subject", "Summary", "ItemTitle", "title"];
pub const ITEM_TYPE: &[&str] = &["ItemType", "Item Type", "Kind", "Type", "ContentType", "type"];
pub const SUBMITTER: &[&str] = &[
    "SubmittedByName",
    "Submitter",
    "WorkerName",
    "SubmittedBy",
    "Author",
];
pub const DATE: &[&str] = &[
    "SubmittedAt",
    "Submitted",
    "QueuedAt",
    "Created",
    "createdAt",
    "created_at",
];

const SEARCH: &[&[&str]] = &[TITLE, ITEM_TYPE, SUBMITTER];

pub fn pipeline(identity: Option<&Identity>) -> ListPipeline<QueueItemType> {
    let base = ListPipeline::new(&tables::QUEUE_ITEM_TYPE)
        .status_fields(ITEM_TYPE)
        .date_fields(DATE)
        .search_fields(SEARCH)
        .total_scope(TotalScope::Unfiltered);
    super::with_owner(base, identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{ViewMode, ViewState, ViewStatePatch};
    use serde_json::json;

    fn queue() -> Vec<serde_json::Value> {
        vec![
            json!({ "Title": "Week off", "ItemType": "Time Off Request", "SubmittedBy": "a@x.io", "SubmittedAt": "2024-07-01" }),
            json!({ "Title": "Ladder", "Kind": "Equipment Request", "SubmittedBy": "b@x.io", "SubmittedAt": "2024-07-03" }),
            json!({ "Title": "Slip", "Type": "Incident Report", "SubmittedByName": "Ana Ruiz", "SubmittedBy": "a@x.io" }),
            json!({ "Title": "???" }),
        ]
    }

    #[test]
    fn test_type_pills_count_whole_queue() {
        let records = queue();
        let me = Identity::new(Some("a@x.io".into()), None);
        let p = pipeline(Some(&me));

        let mine = p.derive(&records, &ViewStatePatch::view_mode(ViewMode::Mine).into());
        assert_eq!(mine.total, 4);
        assert_eq!(mine.showing, 2);
        assert_eq!(mine.counts.get(QueueItemType::TimeOff), 1);
        assert_eq!(mine.counts.get(QueueItemType::Request), 1);
        assert_eq!(mine.counts.get(QueueItemType::Report), 1);
        assert_eq!(mine.counts.get(QueueItemType::Other), 1);
    }

    #[test]
    fn test_type_filter_and_submitter_search() {
        let records = queue();
        let p = pipeline(None);
        let time_off = p.derive(&records, &ViewStatePatch::status("Time Off").into());
        assert_eq!(time_off.showing, 1);
        assert_eq!(time_off.items[0].index, 0);

        let by_name = p.derive(&records, &ViewStatePatch::query("ruiz").into());
        assert_eq!(by_name.showing, 1);
        assert_eq!(by_name.items[0].index, 2);
    }
}
