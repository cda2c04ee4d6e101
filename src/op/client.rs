/// Subprocess bridge to the 1Password `op` CLI.
use std::process::{Command, Stdio};

use super::errors::OpError;
use super::records::{Member, parse_group_members, parse_vault_groups};

/// Default binary name, resolved through `PATH`.
pub const DEFAULT_OP_BIN: &str = "op";

/// Directory lookups the report needs.
///
/// Implemented by [`OpClient`] for real runs; tests substitute an in-memory directory.
pub trait Directory {
    /// Names of the groups with access to `vault`, in the order reported.
    ///
    /// # Errors
    ///
    /// Returns `OpError` if the lookup fails or its output cannot be parsed.
    fn list_groups_for_vault(&self, vault: &str) -> Result<Vec<String>, OpError>;

    /// Members of `group`, in the order reported. Empty when the group has no members.
    ///
    /// # Errors
    ///
    /// Returns `OpError::CommandFailed` if the CLI reports an error.
    fn list_group_members(&self, group: &str) -> Result<Vec<Member>, OpError>;
}

/// Runs `op` as a blocking subprocess, one call per lookup.
#[derive(Debug, Clone)]
pub struct OpClient {
    bin: String,
    account: Option<String>,
}

impl OpClient {
    /// Create a client for `bin`, forwarding `account` to every call when set.
    #[must_use]
    pub fn new(bin: impl Into<String>, account: Option<String>) -> Self {
        Self {
            bin: bin.into(),
            account,
        }
    }

    /// Full argument vector for a subcommand, with the global flags prepended.
    fn build_args(&self, subcommand: &[&str]) -> Vec<String> {
        let mut args = vec!["--format".to_owned(), "json".to_owned()];
        if let Some(account) = &self.account {
            args.push("--account".to_owned());
            args.push(account.clone());
        }
        args.extend(subcommand.iter().map(|s| (*s).to_owned()));
        args
    }

    /// Run `op` and return its stdout.
    ///
    /// Any stderr output or a non-zero exit is treated as failure.
    fn run(&self, subcommand: &[&str]) -> Result<String, OpError> {
        let args = self.build_args(subcommand);
        tracing::debug!(bin = %self.bin, args = ?args, "invoking op");

        let output = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    OpError::NotInstalled {
                        bin: self.bin.clone(),
                    }
                } else {
                    OpError::Spawn {
                        bin: self.bin.clone(),
                        source,
                    }
                }
            })?;

        if !output.stderr.is_empty() || !output.status.success() {
            tracing::debug!(code = ?output.status.code(), "op reported an error");
            return Err(OpError::CommandFailed {
                args: args.join(" "),
                stderr: output.stderr,
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for OpClient {
    fn default() -> Self {
        Self::new(DEFAULT_OP_BIN, None)
    }
}

impl Directory for OpClient {
    fn list_groups_for_vault(&self, vault: &str) -> Result<Vec<String>, OpError> {
        let stdout = self.run(&["vault", "group", "list", vault])?;
        let groups = parse_vault_groups(&stdout, vault)?;
        tracing::debug!(%vault, count = groups.len(), "resolved vault groups");
        Ok(groups)
    }

    fn list_group_members(&self, group: &str) -> Result<Vec<Member>, OpError> {
        let stdout = self.run(&["group", "user", "list", group])?;
        let members = parse_group_members(&stdout, group)?;
        tracing::debug!(%group, count = members.len(), "resolved group members");
        Ok(members)
    }
}
