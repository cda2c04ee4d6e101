/// Report generator: vault → groups → members → managers → output.
use std::io::Write;

use super::errors::ReportError;
use super::group::{Group, ManagerFilter};
use crate::cli::output::{DebugTimer, OutputCtx, write_report};
use crate::op::Directory;
use crate::types::{GroupReportOutput, ManagerOutput};

/// Resolve every group with access to `vault` and load its members.
///
/// Groups are kept in the order the directory returned them. The first
/// failing member lookup aborts the whole collection.
///
/// # Errors
///
/// Returns `ReportError::Op` from the first failing lookup.
pub fn collect_groups<D: Directory + ?Sized>(
    directory: &D,
    vault: &str,
) -> Result<Vec<Group>, ReportError> {
    let names = directory.list_groups_for_vault(vault)?;
    let mut groups = Vec::with_capacity(names.len());
    for name in names {
        let members = directory.list_group_members(&name)?;
        groups.push(Group::new(name).with_members(members));
    }
    Ok(groups)
}

/// Project groups into their output form, keeping only managers.
#[must_use]
pub fn summarize(groups: &[Group], filter: ManagerFilter) -> Vec<GroupReportOutput> {
    groups
        .iter()
        .map(|group| {
            let managers: Vec<ManagerOutput> = group
                .derive_managers(filter)
                .into_iter()
                .map(ManagerOutput::from)
                .collect();
            tracing::debug!(
                group = %group.name,
                members = group.members().len(),
                managers = managers.len(),
                "derived managers"
            );
            GroupReportOutput {
                group: group.name.clone(),
                managers,
            }
        })
        .collect()
}

/// Run the full report for `vault` and write it to `out`.
///
/// Nothing is written unless every lookup succeeded.
///
/// # Errors
///
/// Returns `ReportError::Op` on lookup failure, `ReportError::Output` if writing fails.
pub fn run<D: Directory + ?Sized, W: Write>(
    directory: &D,
    vault: &str,
    filter: ManagerFilter,
    ctx: &OutputCtx,
    out: &mut W,
) -> Result<(), ReportError> {
    let t_collect = DebugTimer::new("collect_groups");
    let groups = collect_groups(directory, vault)?;
    drop(t_collect);

    let reports = summarize(&groups, filter);

    let _t_write = DebugTimer::new("write_report");
    write_report(&reports, ctx, out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::op::OpError;
    use crate::op::records::{Member, MemberState, Role};

    /// In-memory directory that records which groups were looked up.
    #[derive(Default)]
    struct FakeDirectory {
        vaults: HashMap<String, Vec<String>>,
        members: HashMap<String, Vec<Member>>,
        failing: HashMap<String, String>,
        lookups: RefCell<Vec<String>>,
    }

    impl FakeDirectory {
        fn vault(mut self, vault: &str, groups: &[&str]) -> Self {
            self.vaults.insert(
                vault.to_owned(),
                groups.iter().map(|g| (*g).to_owned()).collect(),
            );
            self
        }

        fn group(mut self, group: &str, members: Vec<Member>) -> Self {
            self.members.insert(group.to_owned(), members);
            self
        }

        fn failing(mut self, group: &str, stderr: &str) -> Self {
            self.failing.insert(group.to_owned(), stderr.to_owned());
            self
        }
    }

    impl Directory for FakeDirectory {
        fn list_groups_for_vault(&self, vault: &str) -> Result<Vec<String>, OpError> {
            Ok(self.vaults.get(vault).cloned().unwrap_or_default())
        }

        fn list_group_members(&self, group: &str) -> Result<Vec<Member>, OpError> {
            self.lookups.borrow_mut().push(group.to_owned());
            if let Some(stderr) = self.failing.get(group) {
                return Err(OpError::CommandFailed {
                    args: format!("group user list {group}"),
                    stderr: stderr.as_bytes().to_vec(),
                    code: Some(1),
                });
            }
            Ok(self.members.get(group).cloned().unwrap_or_default())
        }
    }

    fn member(name: &str, email: &str, role: Role, state: MemberState) -> Member {
        Member {
            id: format!("id-{name}"),
            name: name.to_owned(),
            email: email.to_owned(),
            kind: "MEMBER".to_owned(),
            state,
            role,
        }
    }

    fn engineering() -> FakeDirectory {
        FakeDirectory::default()
            .vault("Engineering", &["Owners", "Viewers"])
            .group(
                "Owners",
                vec![
                    member("Alice", "a@x.com", Role::Manager, MemberState::Active),
                    member("Bob", "b@x.com", Role::Member, MemberState::Active),
                ],
            )
            .group(
                "Viewers",
                vec![member("Carol", "c@x.com", Role::Manager, MemberState::Suspended)],
            )
    }

    fn render(
        directory: &FakeDirectory,
        vault: &str,
        filter: ManagerFilter,
        format: OutputFormat,
    ) -> (Result<(), ReportError>, String) {
        let ctx = OutputCtx::new(format, false, false);
        let mut buf = Vec::new();
        let result = run(directory, vault, filter, &ctx, &mut buf);
        (result, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_text_report() {
        let (result, out) = render(
            &engineering(),
            "Engineering",
            ManagerFilter::ActiveOnly,
            OutputFormat::Text,
        );
        assert!(result.is_ok());
        assert_eq!(
            out,
            "Owners\nAlice, a@x.com\n\nViewers\nNo managers for this group\n\n"
        );
    }

    #[test]
    fn test_csv_report_omits_empty_groups() {
        let (result, out) = render(
            &engineering(),
            "Engineering",
            ManagerFilter::ActiveOnly,
            OutputFormat::Csv,
        );
        assert!(result.is_ok());
        assert_eq!(out, "group,name,email\nOwners,Alice,a@x.com\n");
    }

    #[test]
    fn test_any_state_filter_reports_suspended_manager() {
        let (_, out) = render(
            &engineering(),
            "Engineering",
            ManagerFilter::AnyState,
            OutputFormat::Csv,
        );
        assert_eq!(
            out,
            "group,name,email\nOwners,Alice,a@x.com\nViewers,Carol,c@x.com\n"
        );
    }

    #[test]
    fn test_empty_vault_produces_no_sections() {
        let (result, out) = render(
            &FakeDirectory::default(),
            "Nothing",
            ManagerFilter::ActiveOnly,
            OutputFormat::Text,
        );
        assert!(result.is_ok());
        assert_eq!(out, "");
    }

    #[test]
    fn test_groups_keep_directory_order_and_duplicates() {
        let dir = FakeDirectory::default()
            .vault("v", &["Zeta", "Alpha", "Zeta"])
            .group(
                "Zeta",
                vec![member("Z", "z@x.com", Role::Manager, MemberState::Active)],
            );
        let groups = collect_groups(&dir, "v").unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_failing_lookup_stops_the_run() {
        let dir = FakeDirectory::default()
            .vault("v", &["First", "Broken", "Last"])
            .failing("Broken", "[ERROR] group \"Broken\" isn't a group\n");
        let (result, out) = render(&dir, "v", ManagerFilter::ActiveOnly, OutputFormat::Text);

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.forwarded_stderr(),
            Some(&b"[ERROR] group \"Broken\" isn't a group\n"[..])
        );
        assert_eq!(out, "");
        assert_eq!(*dir.lookups.borrow(), vec!["First", "Broken"]);
    }

    /// Writer whose reader has gone away.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_closed_stdout_is_not_a_failure() {
        let ctx = OutputCtx::new(OutputFormat::Text, false, false);
        let err = run(
            &engineering(),
            "Engineering",
            ManagerFilter::ActiveOnly,
            &ctx,
            &mut ClosedPipe,
        )
        .unwrap_err();
        assert!(err.is_broken_pipe());
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn test_silent_lookup_failure_reports_status() {
        let dir = FakeDirectory::default()
            .vault("v", &["Mute"])
            .failing("Mute", "");
        let (result, out) = render(&dir, "v", ManagerFilter::ActiveOnly, OutputFormat::Text);

        let err = result.unwrap_err();
        assert_eq!(err.forwarded_stderr(), None);
        assert!(err.to_string().ends_with("exited with status 1"));
        assert_eq!(out, "");
    }
}
