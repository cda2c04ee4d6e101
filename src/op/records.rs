/// Typed records extracted from `op --format json` payloads.
///
/// Extraction is best-effort: fields that are absent or not strings become
/// empty strings instead of failing the whole report.
use std::fmt;

use serde_json::Value;

use super::errors::OpError;

/// Membership role of a user inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Manager,
    Member,
    /// Any role string we don't model, kept verbatim (empty when absent).
    Other(String),
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "MANAGER" => Self::Manager,
            "MEMBER" => Self::Member,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manager => f.write_str("MANAGER"),
            Self::Member => f.write_str("MEMBER"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// Account state of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberState {
    Active,
    Suspended,
    Other(String),
}

impl From<&str> for MemberState {
    fn from(s: &str) -> Self {
        match s {
            "ACTIVE" => Self::Active,
            "SUSPENDED" => Self::Suspended,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl fmt::Display for MemberState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("ACTIVE"),
            Self::Suspended => f.write_str("SUSPENDED"),
            Self::Other(s) => f.write_str(s),
        }
    }
}

/// A user belonging to a group, as reported by `op group user list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    /// User type (`MEMBER`, `GUEST`, ...). Named `type` on the wire.
    pub kind: String,
    pub state: MemberState,
    pub role: Role,
}

impl Member {
    /// Build a member from one element of the JSON array.
    fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            name: str_field(value, "name"),
            email: str_field(value, "email"),
            kind: str_field(value, "type"),
            state: MemberState::from(str_field(value, "state").as_str()),
            role: Role::from(str_field(value, "role").as_str()),
        }
    }

    /// Whether this member holds the manager role.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }

    /// Whether this member's account is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == MemberState::Active
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Parse the output of `op vault group list` into group names, in order.
///
/// # Errors
///
/// Returns `OpError::Parse` for invalid JSON and `OpError::UnexpectedShape`
/// when the top-level value is not an array.
pub fn parse_vault_groups(stdout: &str, vault: &str) -> Result<Vec<String>, OpError> {
    let context = format!("vault group list for '{vault}'");
    let value: Value = serde_json::from_str(stdout).map_err(|source| OpError::Parse {
        context: context.clone(),
        source,
    })?;
    let Value::Array(entries) = value else {
        return Err(OpError::UnexpectedShape {
            context,
            expected: "an array of groups",
        });
    };

    let mut names = Vec::with_capacity(entries.len());
    for entry in &entries {
        match entry.get("name").and_then(Value::as_str) {
            Some(name) => names.push(name.to_owned()),
            None => tracing::debug!(%vault, ?entry, "skipping vault group without a name"),
        }
    }
    Ok(names)
}

/// Parse the output of `op group user list` into members, in order.
///
/// Empty output, `null`, and any non-array payload mean "no members".
///
/// # Errors
///
/// Returns `OpError::Parse` when stdout is non-empty but not valid JSON.
pub fn parse_group_members(stdout: &str, group: &str) -> Result<Vec<Member>, OpError> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(stdout).map_err(|source| OpError::Parse {
        context: format!("group user list for '{group}'"),
        source,
    })?;
    match value {
        Value::Array(entries) => Ok(entries.iter().map(Member::from_value).collect()),
        other => {
            if !other.is_null() {
                tracing::debug!(%group, "member payload is not an array; treating as empty");
            }
            Ok(Vec::new())
        }
    }
}
