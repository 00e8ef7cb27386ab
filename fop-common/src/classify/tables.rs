//! Rule tables, declared once per enumeration
//!
//! Order matters. Where one keyword is a substring of another ("unread" ⊃
//! "read", "incomplete" ⊃ "complete", "time off request" ⊃ "request") the
//! narrower rule is declared first.

use super::{QueueItemType, ReadState, ReportStatus, RequestStatus, Rule, RuleTable};

const READ_STATE_RULES: &[Rule<ReadState>] = &[
    Rule::contains(
        &[
            "unread",
            "not read",
            "unseen",
            "not seen",
            "unacknowledged",
            "not acknowledged",
            "unviewed",
            "not viewed",
        ],
        ReadState::Unread,
    ),
    Rule::exact(&["false", "0", "no", "n"], ReadState::Unread),
    Rule::exact(&["true", "1", "yes", "y", "x"], ReadState::Read),
    Rule::contains(&["read", "seen", "acknowledged", "viewed"], ReadState::Read),
];

/// Bulletin read state; blank or unrecognized counts as unread
pub static READ_STATE: RuleTable<ReadState> = RuleTable::new(READ_STATE_RULES, ReadState::Unread);

const REQUEST_STATUS_RULES: &[Rule<RequestStatus>] = &[
    Rule::contains(
        &["insufficient", "more info", "needs info", "incomplete"],
        RequestStatus::Insufficient,
    ),
    Rule::contains(&["reject", "denied", "declined"], RequestStatus::Rejected),
    Rule::contains(&["approv", "granted"], RequestStatus::Approved),
    Rule::contains(&["closed", "complete", "done", "cancel"], RequestStatus::Closed),
    Rule::contains(
        &["progress", "review", "pending", "processing", "working"],
        RequestStatus::InProgress,
    ),
    Rule::contains(&["open", "new", "submitted"], RequestStatus::Open),
];

/// Employee request status
pub static REQUEST_STATUS: RuleTable<RequestStatus> =
    RuleTable::new(REQUEST_STATUS_RULES, RequestStatus::Open);

const REPORT_STATUS_RULES: &[Rule<ReportStatus>] = &[
    Rule::contains(
        &["needs info", "more info", "insufficient", "incomplete", "returned"],
        ReportStatus::NeedsInfo,
    ),
    Rule::contains(&["resolved", "closed", "complete", "done", "fixed"], ReportStatus::Resolved),
    Rule::contains(
        &["review", "progress", "assigned", "investigat"],
        ReportStatus::UnderReview,
    ),
    Rule::contains(&["new", "submitted", "open"], ReportStatus::New),
];

/// Field report status
pub static REPORT_STATUS: RuleTable<ReportStatus> =
    RuleTable::new(REPORT_STATUS_RULES, ReportStatus::New);

const QUEUE_ITEM_TYPE_RULES: &[Rule<QueueItemType>] = &[
    Rule::contains(&["time off", "timeoff", "vacation", "leave request"], QueueItemType::TimeOff),
    Rule::exact(&["pto", "leave"], QueueItemType::TimeOff),
    Rule::contains(&["report", "incident"], QueueItemType::Report),
    Rule::contains(&["request"], QueueItemType::Request),
    Rule::contains(&["bulletin", "notice", "announcement"], QueueItemType::Bulletin),
];

/// Review queue item type
pub static QUEUE_ITEM_TYPE: RuleTable<QueueItemType> =
    RuleTable::new(QUEUE_ITEM_TYPE_RULES, QueueItemType::Other);
