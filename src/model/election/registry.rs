use std::collections::HashSet;

use crate::model::common::AgentId;

/// The agents eligible to vote in the current election.
#[derive(Debug, Clone, Default)]
pub struct MemberRegistry {
    members: HashSet<AgentId>,
}

impl MemberRegistry {
    /// Admit an agent. Returns false if it was already a member.
    pub fn admit(&mut self, agent: AgentId) -> bool {
        self.members.insert(agent)
    }

    pub fn contains(&self, agent: &AgentId) -> bool {
        self.members.contains(agent)
    }

    /// Number of registered voters; the denominator for majority checks.
    pub fn voter_count(&self) -> usize {
        self.members.len()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}
