//! Field reports submitted by workers

use crate::classify::{tables, ReportStatus};
use crate::pipeline::{Identity, ListPipeline};
use crate::resolve::resolve_text;

pub const SCHEMA_VERSION: u32 = 2;

pub const TITLE: &[&str] = &["Title", "Subject", "Summary", "ReportType", "title"];
pub const REPORT_TYPE: &[&str] = &["ReportType", "Report Type", "Type", "Category", "type"];
pub const STATUS: &[&str] = &["Status", "ReportStatus", "status", "State"];
pub const DATE: &[&str] = &[
    "SubmittedAt",
    "Submitted",
    "ReportDate",
    "Created",
    "createdAt",
    "created_at",
    "Date",
];
pub const LOCATION: &[&str] = &["Site", "Location", "Stop", "Address", "site"];
pub const DETAILS: &[&str] = &["Details", "Description", "Notes", "Body"];

const SEARCH: &[&[&str]] = &[TITLE, REPORT_TYPE, LOCATION, DETAILS];

/// Report list; "mine" matches the session's worker id or email
pub fn pipeline(identity: Option<&Identity>) -> ListPipeline<ReportStatus> {
    let base = ListPipeline::new(&tables::REPORT_STATUS)
        .status_fields(STATUS)
        .date_fields(DATE)
        .search_fields(SEARCH)
        .secondary_with(|record| resolve_text(record, REPORT_TYPE));
    super::with_owner(base, identity)
}
