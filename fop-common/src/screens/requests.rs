//! Employee requests (equipment, time off, reimbursements)

use crate::classify::{tables, RequestStatus};
use crate::pipeline::{Identity, ListPipeline};
use crate::resolve::resolve_text;

pub const SCHEMA_VERSION: u32 = 4;

pub const TITLE: &[&str] = &["Title", "Subject", "RequestTitle", "Item", "title"];
pub const REQUEST_TYPE: &[&str] = &["RequestType", "Request Type", "Type", "Category", "type"];
pub const STATUS: &[&str] = &["Status", "RequestStatus", "Approval", "status", "State"];
pub const DATE: &[&str] = &[
    "RequestedAt",
    "Requested",
    "SubmittedAt",
    "Created",
    "createdAt",
    "created_at",
    "Date",
];
pub const NOTES: &[&str] = &["Notes", "Details", "Description", "Reason", "notes"];

const SEARCH: &[&[&str]] = &[TITLE, REQUEST_TYPE, NOTES];

pub fn pipeline(identity: Option<&Identity>) -> ListPipeline<RequestStatus> {
    let base = ListPipeline::new(&tables::REQUEST_STATUS)
        .status_fields(STATUS)
        .date_fields(DATE)
        .search_fields(SEARCH)
        .secondary_with(|record| resolve_text(record, REQUEST_TYPE));
    super::with_owner(base, identity)
}
