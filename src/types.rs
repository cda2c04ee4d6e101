/// Shared serializable output types.
///
/// These types are what gets written to stdout, either as JSON or rendered as
/// text/CSV/table. They are decoupled from the internal `Group` / `Member` types.
use serde::{Deserialize, Serialize};

use crate::op::{Member, OpError};
use crate::report::ReportError;

/// One manager of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerOutput {
    /// 1Password user ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// User type as reported by `op`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Account state (e.g., "ACTIVE").
    pub state: String,
    /// Group role (always "MANAGER").
    pub role: String,
}

impl From<&Member> for ManagerOutput {
    fn from(m: &Member) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            email: m.email.clone(),
            kind: m.kind.clone(),
            state: m.state.to_string(),
            role: m.role.to_string(),
        }
    }
}

/// A vault group and its managers, in directory order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReportOutput {
    /// Group name.
    pub group: String,
    /// Managers of the group; empty when it has none.
    pub managers: Vec<ManagerOutput>,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `ReportError`.
    #[must_use]
    pub fn from_report_error(err: &ReportError) -> Self {
        let code = match err {
            ReportError::Op(OpError::NotInstalled { .. }) => "op_not_installed",
            ReportError::Op(OpError::Spawn { .. }) => "op_spawn_failed",
            ReportError::Op(OpError::CommandFailed { .. }) => "op_command_failed",
            ReportError::Op(OpError::Parse { .. } | OpError::UnexpectedShape { .. }) => {
                "op_output_invalid"
            }
            ReportError::Output(_) => "output_failed",
        };
        Self {
            ok: false,
            error: ErrorDetail {
                code: code.to_owned(),
                message: err.to_string(),
            },
        }
    }
}
