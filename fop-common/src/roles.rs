//! Role collection and privileged-tier hints
//!
//! The upstream role model is inconsistent: a role may be a plain string, a
//! list of strings, a list of `{name}` / `{title}` objects, or spread across
//! several differently named fields. [`collect_role_strings`] flattens all of
//! these into one ordered, deduplicated [`RoleSet`].
//!
//! # Advisory only
//!
//! [`is_privileged`] is a substring check over free text. It decides whether
//! office-tier controls are *shown*. It is not an authorization check and must
//! never be used as one; access control belongs to the backend.

use serde_json::Value;
use tracing::debug;

use crate::resolve::{coerce_text, probe_all};

/// Fields that may carry role indicators on a user record
pub const ROLE_FIELDS: &[&str] = &[
    "role",
    "roles",
    "userRole",
    "user_role",
    "position",
    "jobTitle",
    "groups",
    "accessLevel",
    "access_level",
];

/// Keywords marking the office+ tier
pub const PRIVILEGED_KEYWORDS: &[&str] =
    &["office", "admin", "manager", "dispatcher", "supervisor", "office+"];

/// Ordered set of role strings (first-seen order, exact-match dedup)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: Vec<String>,
}

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role; blank and duplicate strings are ignored
    pub fn insert(&mut self, role: &str) -> bool {
        let role = role.trim();
        if role.is_empty() || self.contains(role) {
            return false;
        }
        self.roles.push(role.to_string());
        true
    }

    pub fn contains(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(String::as_str)
    }

    /// Flatten a role-bearing value into the set
    ///
    /// Scalars are appended, arrays recursed, objects contribute their `name`
    /// and `title` sub-fields. Anything else is ignored.
    pub fn absorb(&mut self, value: &Value) {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                self.insert(&coerce_text(Some(value)));
            }
            Value::Array(items) => items.iter().for_each(|item| self.absorb(item)),
            Value::Object(map) => {
                for key in ["name", "title"] {
                    if let Some(sub) = map.get(key) {
                        match sub {
                            Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                                self.insert(&coerce_text(Some(sub)));
                            }
                            _ => {}
                        }
                    }
                }
            }
            Value::Null => {}
        }
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.roles.iter()
    }
}

/// Gather role strings from a user record and any extra sources
///
/// Every [`ROLE_FIELDS`] entry is probed through all record shapes. Extra
/// sources (for example a page-level role global supplied by the host) are
/// flattened as-is.
pub fn collect_role_strings(user: &Value, extra_sources: &[&Value]) -> RoleSet {
    let mut set = RoleSet::new();
    for field in ROLE_FIELDS {
        if let Some(value) = probe_all(user, field) {
            set.absorb(value);
        }
    }
    for source in extra_sources {
        set.absorb(source);
    }
    set
}

/// Result of the privileged-tier check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivilegeHint {
    pub privileged: bool,
    /// Keyword that triggered the hint
    pub matched: Option<&'static str>,
}

/// Evaluate the office+ hint and report which keyword matched
pub fn privilege_hint(roles: &RoleSet) -> PrivilegeHint {
    let joined = roles.iter().collect::<Vec<_>>().join(" ").to_lowercase();
    let matched = PRIVILEGED_KEYWORDS.iter().copied().find(|k| joined.contains(k));
    if let Some(keyword) = matched {
        debug!("Privileged-tier hint from keyword '{}'", keyword);
    }
    PrivilegeHint {
        privileged: matched.is_some(),
        matched,
    }
}

/// True if any role string contains a privileged keyword (UI hint only)
pub fn is_privileged(roles: &RoleSet) -> bool {
    privilege_hint(roles).privileged
}
