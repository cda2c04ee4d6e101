/// Group model: a vault group and the managers derived from its members.
use crate::op::Member;

/// Which members count as managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManagerFilter {
    /// Role is `MANAGER` and the account is `ACTIVE`.
    #[default]
    ActiveOnly,
    /// Role is `MANAGER`, whatever the account state.
    AnyState,
}

impl ManagerFilter {
    fn accepts(self, member: &Member) -> bool {
        match self {
            Self::ActiveOnly => member.is_manager() && member.is_active(),
            Self::AnyState => member.is_manager(),
        }
    }
}

/// A group with access to the vault, and its members in directory order.
#[derive(Debug, Clone)]
pub struct Group {
    pub name: String,
    members: Vec<Member>,
}

impl Group {
    /// A group with no members loaded yet.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Replace the member list.
    #[must_use]
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Members accepted by `filter`, preserving directory order.
    #[must_use]
    pub fn derive_managers(&self, filter: ManagerFilter) -> Vec<&Member> {
        self.members.iter().filter(|m| filter.accepts(m)).collect()
    }
}
