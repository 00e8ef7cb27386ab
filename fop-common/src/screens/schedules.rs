//! Shift schedule, soonest first

use crate::classify::{tables, RequestStatus};
use crate::pipeline::{Identity, ListPipeline, SortOrder};
use crate::resolve::resolve_text;

pub const SCHEMA_VERSION: u32 = 1;

pub const TITLE: &[&str] = &["Shift", "ShiftName", "Title", "Role", "title"];
pub const SITE: &[&str] = &["Site", "Location", "Crew", "site"];
pub const STATUS: &[&str] = &["ShiftStatus", "Status", "Confirmation", "status"];
pub const DATE: &[&str] = &["ShiftStart", "Start", "StartTime", "start", "Date", "date"];

const SEARCH: &[&[&str]] = &[TITLE, SITE];

pub fn pipeline(identity: Option<&Identity>) -> ListPipeline<RequestStatus> {
    let base = ListPipeline::new(&tables::REQUEST_STATUS)
        .status_fields(STATUS)
        .date_fields(DATE)
        .search_fields(SEARCH)
        .secondary_with(|record| resolve_text(record, SITE))
        .sort_order(SortOrder::OldestFirst);
    super::with_owner(base, identity)
}
