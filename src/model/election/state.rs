use serde::Serialize;

use super::{
    ballot_box::{BallotBox, Tally},
    outcome::Outcome,
    registry::MemberRegistry,
    resolver::{self, Victor},
};
use crate::model::common::AgentId;

/// Stages in the election lifecycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub enum ElectionPhase {
    /// No ballots cast yet; registration is allowed.
    #[default]
    Open,
    /// At least one ballot cast; registration is closed until reset.
    Voting,
}

/// The whole election: members, ballots, tally and phase.
///
/// All mutation goes through [`register`](Self::register),
/// [`vote`](Self::vote) and [`reset`](Self::reset).
#[derive(Debug, Clone, Default)]
pub struct ElectionState {
    registry: MemberRegistry,
    ballot_box: BallotBox,
    phase: ElectionPhase,
}

impl ElectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `agent` as a voter.
    ///
    /// A repeat registration is reported as `AlreadyRegistered` even once
    /// registration has closed.
    pub fn register(&mut self, agent: AgentId) -> Outcome {
        if self.phase == ElectionPhase::Voting {
            return if self.registry.contains(&agent) {
                Outcome::AlreadyRegistered
            } else {
                Outcome::RegistrationClosed
            };
        }
        if self.registry.admit(agent) {
            Outcome::Accepted
        } else {
            Outcome::AlreadyRegistered
        }
    }

    /// Record `voter`'s ballot for `candidate`. The first accepted ballot
    /// closes registration.
    pub fn vote(&mut self, voter: AgentId, candidate: AgentId) -> Outcome {
        let outcome = self.ballot_box.cast(&self.registry, voter, candidate);
        if outcome.is_accepted() {
            self.phase = ElectionPhase::Voting;
        }
        outcome
    }

    pub fn resolve(&self) -> Victor {
        resolver::resolve(self.ballot_box.tally(), self.registry.voter_count())
    }

    /// Return to an empty `Open` election, whatever the current phase.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.ballot_box.clear();
        self.phase = ElectionPhase::Open;
    }

    pub fn phase(&self) -> ElectionPhase {
        self.phase
    }

    pub fn voter_count(&self) -> usize {
        self.registry.voter_count()
    }

    pub fn ballot_count(&self) -> usize {
        self.ballot_box.len()
    }

    pub fn is_member(&self, agent: &AgentId) -> bool {
        self.registry.contains(agent)
    }

    pub fn ballot(&self, voter: &AgentId) -> Option<&AgentId> {
        self.ballot_box.ballot(voter)
    }

    pub fn tally(&self) -> &Tally {
        self.ballot_box.tally()
    }
}
