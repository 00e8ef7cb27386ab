//! Bulletin board: read/unread, newest first

use crate::classify::{tables, ReadState};
use crate::pipeline::ListPipeline;
use crate::resolve::resolve_text;

pub const SCHEMA_VERSION: u32 = 3;

pub const TITLE: &[&str] = &["Title", "title", "Subject", "Headline", "Name"];
pub const BODY: &[&str] = &["Body", "Message", "Content", "Description", "body"];
pub const DATE: &[&str] = &[
    "PublishedAt",
    "Published",
    "PostedAt",
    "Created",
    "createdAt",
    "created_at",
    "Date",
];
pub const READ: &[&str] = &["Read", "IsRead", "is_read", "ReadStatus", "read", "Acknowledged"];
pub const CATEGORY: &[&str] = &["Category", "category", "Type", "Topic"];

const SEARCH: &[&[&str]] = &[TITLE, BODY, CATEGORY];

/// Bulletin list; the secondary filter selects a category
pub fn pipeline() -> ListPipeline<ReadState> {
    ListPipeline::new(&tables::READ_STATE)
        .status_fields(READ)
        .date_fields(DATE)
        .search_fields(SEARCH)
        .secondary_with(|record| resolve_text(record, CATEGORY))
}
