//! Ownership matching for "mine" views

use serde_json::Value;

use crate::resolve::resolve_text;

/// Current user's identity as supplied by the session collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub email: Option<String>,
    pub worker_id: Option<String>,
}

impl Identity {
    pub fn new(email: Option<String>, worker_id: Option<String>) -> Self {
        Self { email, worker_id }
    }

    /// No usable identifier; such an identity owns nothing
    pub fn is_anonymous(&self) -> bool {
        normalized(self.email.as_deref()).is_none()
            && normalized(self.worker_id.as_deref()).is_none()
    }
}

/// Matches records whose owner fields resolve to the current identity
#[derive(Debug, Clone)]
pub struct OwnerMatch {
    email: Option<String>,
    worker_id: Option<String>,
    email_fields: &'static [&'static str],
    worker_fields: &'static [&'static str],
}

impl OwnerMatch {
    pub fn new(
        identity: &Identity,
        email_fields: &'static [&'static str],
        worker_fields: &'static [&'static str],
    ) -> Self {
        Self {
            email: normalized(identity.email.as_deref()),
            worker_id: normalized(identity.worker_id.as_deref()),
            email_fields,
            worker_fields,
        }
    }

    /// True if either the worker id or the email matches (case-insensitive)
    pub fn is_owner(&self, record: &Value) -> bool {
        let worker_hit = self
            .worker_id
            .as_deref()
            .is_some_and(|id| field_matches(record, self.worker_fields, id));
        worker_hit
            || self
                .email
                .as_deref()
                .is_some_and(|email| field_matches(record, self.email_fields, email))
    }
}

fn field_matches(record: &Value, fields: &[&str], expected: &str) -> bool {
    resolve_text(record, fields).trim().to_lowercase() == expected
}

fn normalized(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty())
}
