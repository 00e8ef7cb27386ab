//! Category enumerations used across portal screens

use serde::{Deserialize, Serialize};

use super::CategoryLabel;

/// Bulletin read state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadState {
    Read,
    Unread,
}

impl CategoryLabel for ReadState {
    const ALL: &'static [Self] = &[ReadState::Read, ReadState::Unread];

    fn as_str(&self) -> &'static str {
        match self {
            ReadState::Read => "read",
            ReadState::Unread => "unread",
        }
    }
}

/// Employee request lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    Open,
    InProgress,
    Insufficient,
    Approved,
    Rejected,
    Closed,
}

impl CategoryLabel for RequestStatus {
    const ALL: &'static [Self] = &[
        RequestStatus::Open,
        RequestStatus::InProgress,
        RequestStatus::Insufficient,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Closed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "Open",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Insufficient => "Insufficient",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Closed => "Closed",
        }
    }
}

/// Field report review status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    New,
    UnderReview,
    NeedsInfo,
    Resolved,
}

impl CategoryLabel for ReportStatus {
    const ALL: &'static [Self] = &[
        ReportStatus::New,
        ReportStatus::UnderReview,
        ReportStatus::NeedsInfo,
        ReportStatus::Resolved,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::New => "New",
            ReportStatus::UnderReview => "Under Review",
            ReportStatus::NeedsInfo => "Needs Info",
            ReportStatus::Resolved => "Resolved",
        }
    }
}

/// Kind of item waiting in the office review queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueItemType {
    Report,
    Request,
    TimeOff,
    Bulletin,
    Other,
}

impl CategoryLabel for QueueItemType {
    const ALL: &'static [Self] = &[
        QueueItemType::Report,
        QueueItemType::Request,
        QueueItemType::TimeOff,
        QueueItemType::Bulletin,
        QueueItemType::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            QueueItemType::Report => "Report",
            QueueItemType::Request => "Request",
            QueueItemType::TimeOff => "Time Off",
            QueueItemType::Bulletin => "Bulletin",
            QueueItemType::Other => "Other",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(ReadState, RequestStatus, ReportStatus, QueueItemType);
