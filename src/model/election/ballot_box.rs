use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{outcome::Outcome, registry::MemberRegistry};
use crate::model::common::AgentId;

/// Per-candidate vote counts, derived from the recorded ballots.
///
/// Candidates are kept in lexicographic order so that iteration, and
/// therefore tie-breaking, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<AgentId, u64>,
}

impl Tally {
    pub fn count(&self, candidate: &AgentId) -> u64 {
        self.counts.get(candidate).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct candidates with at least one vote.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AgentId, u64)> {
        self.counts.iter().map(|(candidate, &count)| (candidate, count))
    }

    /// The candidate with the greatest count. Ties go to the
    /// lexicographically smallest identifier.
    pub fn leader(&self) -> Option<(&AgentId, u64)> {
        self.iter().fold(None, |best, (candidate, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((candidate, count)),
        })
    }

    fn record(&mut self, candidate: AgentId) {
        *self.counts.entry(candidate).or_insert(0) += 1;
    }
}

/// Records each voter's single ballot and keeps the tally in step with it.
#[derive(Debug, Clone, Default)]
pub struct BallotBox {
    ballots: HashMap<AgentId, AgentId>,
    tally: Tally,
}

impl BallotBox {
    /// Cast `voter`'s ballot for `candidate`.
    ///
    /// The voter must be a member of `registry` and must not have voted yet.
    /// The candidate can be any identifier, member or not.
    pub fn cast(
        &mut self,
        registry: &MemberRegistry,
        voter: AgentId,
        candidate: AgentId,
    ) -> Outcome {
        if !registry.contains(&voter) {
            return Outcome::NotEligible;
        }
        if self.ballots.contains_key(&voter) {
            return Outcome::AlreadyVoted;
        }
        self.tally.record(candidate.clone());
        self.ballots.insert(voter, candidate);
        Outcome::Accepted
    }

    /// The candidate `voter` chose, if they have voted.
    pub fn ballot(&self, voter: &AgentId) -> Option<&AgentId> {
        self.ballots.get(voter)
    }

    /// Number of ballots cast.
    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn clear(&mut self) {
        self.ballots.clear();
        self.tally = Tally::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(members: &[&str]) -> MemberRegistry {
        let mut registry = MemberRegistry::default();
        for member in members {
            registry.admit((*member).into());
        }
        registry
    }

    #[test]
    fn member_can_vote_once() {
        let registry = registry(&["a"]);
        let mut ballots = BallotBox::default();

        assert_eq!(
            ballots.cast(&registry, "a".into(), "X".into()),
            Outcome::Accepted
        );
        assert_eq!(
            ballots.cast(&registry, "a".into(), "Y".into()),
            Outcome::AlreadyVoted
        );

        assert_eq!(ballots.ballot(&"a".into()), Some(&AgentId::from("X")));
        assert_eq!(ballots.tally().count(&"X".into()), 1);
        assert_eq!(ballots.tally().count(&"Y".into()), 0);
        assert_eq!(ballots.len(), 1);
    }

    #[test]
    fn non_member_cannot_vote() {
        let registry = registry(&["a"]);
        let mut ballots = BallotBox::default();

        assert_eq!(
            ballots.cast(&registry, "b".into(), "X".into()),
            Outcome::NotEligible
        );
        assert!(ballots.is_empty());
        assert!(ballots.tally().is_empty());
    }

    #[test]
    fn candidate_need_not_be_member() {
        let registry = registry(&["a", "b"]);
        let mut ballots = BallotBox::default();

        ballots.cast(&registry, "a".into(), "outsider".into());
        ballots.cast(&registry, "b".into(), "a".into());

        assert_eq!(ballots.tally().count(&"outsider".into()), 1);
        assert_eq!(ballots.tally().count(&"a".into()), 1);
        assert_eq!(ballots.tally().len(), 2);
    }

    #[test]
    fn tally_matches_ballots() {
        let registry = registry(&["a", "b", "c", "d"]);
        let mut ballots = BallotBox::default();
        for (voter, candidate) in [("a", "X"), ("b", "Y"), ("c", "X"), ("d", "X")] {
            ballots.cast(&registry, voter.into(), candidate.into());
        }

        let counts = ballots
            .tally()
            .iter()
            .map(|(candidate, count)| (candidate.to_string(), count))
            .collect::<Vec<_>>();
        assert_eq!(counts, vec![("X".to_string(), 3), ("Y".to_string(), 1)]);
    }

    #[test]
    fn leader_breaks_ties_lexicographically() {
        let registry = registry(&["a", "b", "c", "d", "e"]);
        let mut ballots = BallotBox::default();
        for (voter, candidate) in [("a", "Z"), ("b", "M"), ("c", "Z"), ("d", "M"), ("e", "A")] {
            ballots.cast(&registry, voter.into(), candidate.into());
        }

        assert_eq!(ballots.tally().leader(), Some((&AgentId::from("M"), 2)));
    }

    #[test]
    fn leader_of_empty_tally() {
        assert_eq!(Tally::default().leader(), None);
    }

    #[test]
    fn clear_empties_ballots_and_tally() {
        let registry = registry(&["a"]);
        let mut ballots = BallotBox::default();
        ballots.cast(&registry, "a".into(), "X".into());

        ballots.clear();

        assert!(ballots.is_empty());
        assert!(ballots.tally().is_empty());
        assert_eq!(ballots.ballot(&"a".into()), None);
    }
}
