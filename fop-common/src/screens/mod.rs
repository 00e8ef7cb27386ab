//! Screen definitions: candidate-field tables and list presets
//!
//! Each portal screen declares, once, which upstream field names may carry
//! each logical attribute. Candidate order is priority order. When an upstream
//! system renames a field, add the new name to the relevant list and bump the
//! screen's `SCHEMA_VERSION`; call sites never probe records themselves.

pub mod bulletins;
pub mod reports;
pub mod requests;
pub mod review_queue;
pub mod schedules;

use std::str::FromStr;

use crate::pipeline::{Identity, ListPipeline, OwnerMatch};
use crate::classify::CategoryLabel;
use crate::Error;

/// Fields carrying the submitting worker's id
pub const WORKER_ID_FIELDS: &[&str] = &[
    "WorkerId",
    "Worker ID",
    "workerId",
    "worker_id",
    "EmployeeId",
    "employee_id",
];

/// Fields carrying the submitting worker's email
pub const EMAIL_FIELDS: &[&str] = &[
    "SubmittedBy",
    "Email",
    "email",
    "WorkerEmail",
    "CreatedBy",
    "created_by",
];

/// Portal screens with a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Bulletins,
    Reports,
    Requests,
    ReviewQueue,
    Schedules,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Bulletins,
        Screen::Reports,
        Screen::Requests,
        Screen::ReviewQueue,
        Screen::Schedules,
    ];

    /// Name used in configuration and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Bulletins => "bulletins",
            Screen::Reports => "reports",
            Screen::Requests => "requests",
            Screen::ReviewQueue => "review-queue",
            Screen::Schedules => "schedules",
        }
    }

    /// Candidate list for the title shown in each row
    pub fn title_fields(&self) -> &'static [&'static str] {
        match self {
            Screen::Bulletins => bulletins::TITLE,
            Screen::Reports => reports::TITLE,
            Screen::Requests => requests::TITLE,
            Screen::ReviewQueue => review_queue::TITLE,
            Screen::Schedules => schedules::TITLE,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Screen::ALL
            .iter()
            .copied()
            .find(|screen| screen.name() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown screen: {}", s)))
    }
}

/// Attach the standard worker-id/email ownership predicate
pub(crate) fn with_owner<L: CategoryLabel>(
    pipeline: ListPipeline<L>,
    identity: Option<&Identity>,
) -> ListPipeline<L> {
    match identity {
        Some(identity) => {
            let owner = OwnerMatch::new(identity, EMAIL_FIELDS, WORKER_ID_FIELDS);
            pipeline.owned_by(move |record| owner.is_owner(record))
        }
        None => pipeline,
    }
}
