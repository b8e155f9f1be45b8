use std::sync::Arc;

use log::{debug, info};
use rocket::tokio::sync::{RwLock, RwLockReadGuard};

use super::{outcome::Outcome, resolver::Victor, state::ElectionState};
use crate::model::api::{
    command::{RegisterCommand, VoteCommand},
    summary::ElectionSummary,
};

/// Shared handle to the process-wide election.
///
/// Writers (`register`, `vote`, `reset`) are serialised against each other
/// and against readers; readers see a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct ElectionHandle {
    state: Arc<RwLock<ElectionState>>,
}

impl ElectionHandle {
    pub async fn register(&self, command: RegisterCommand) -> Outcome {
        let agent = command.agent_id;
        let outcome = self.state.write().await.register(agent.clone());
        log_outcome("register", &agent, outcome);
        outcome
    }

    pub async fn vote(&self, command: VoteCommand) -> Outcome {
        let VoteCommand {
            voter_id,
            candidate_id,
        } = command;
        let outcome = self
            .state
            .write()
            .await
            .vote(voter_id.clone(), candidate_id);
        log_outcome("vote", &voter_id, outcome);
        outcome
    }

    pub async fn resolve(&self) -> Victor {
        self.state.read().await.resolve()
    }

    pub async fn reset(&self) {
        self.state.write().await.reset();
        info!("Election reset");
    }

    pub async fn summary(&self) -> ElectionSummary {
        ElectionSummary::from(&*self.state.read().await)
    }

    /// Read access to the underlying state, held until the guard drops.
    pub async fn read(&self) -> RwLockReadGuard<'_, ElectionState> {
        self.state.read().await
    }
}

fn log_outcome(operation: &str, agent: &impl std::fmt::Display, outcome: Outcome) {
    if outcome.is_accepted() {
        info!("{operation} by '{agent}' accepted");
    } else {
        debug!("{operation} by '{agent}' ignored: {outcome}");
    }
}

#[cfg(test)]
mod tests {
    use rocket::futures::future::join_all;

    use super::*;
    use crate::model::{common::AgentId, election::state::ElectionPhase};

    fn register(agent: &str) -> RegisterCommand {
        RegisterCommand {
            agent_id: agent.into(),
        }
    }

    fn vote(voter: &str, candidate: &str) -> VoteCommand {
        VoteCommand {
            voter_id: voter.into(),
            candidate_id: candidate.into(),
        }
    }

    #[rocket::async_test]
    async fn clones_share_state() {
        let handle = ElectionHandle::default();
        let other = handle.clone();

        handle.register(register("a")).await;
        other.vote(vote("a", "X")).await;

        assert_eq!(handle.resolve().await, Victor::Winner("X".into()));
        assert_eq!(other.read().await.phase(), ElectionPhase::Voting);
    }

    #[rocket::async_test]
    async fn reset_clears_shared_state() {
        let handle = ElectionHandle::default();
        handle.register(register("a")).await;
        handle.vote(vote("a", "X")).await;

        handle.clone().reset().await;

        let state = handle.read().await;
        assert_eq!(state.voter_count(), 0);
        assert_eq!(state.ballot_count(), 0);
        assert_eq!(state.phase(), ElectionPhase::Open);
        assert_eq!(state.resolve(), Victor::NoWinner);
    }

    #[rocket::async_test]
    async fn concurrent_registrations_are_not_lost() {
        let handle = ElectionHandle::default();
        let tasks = (0..200).map(|i| {
            let handle = handle.clone();
            rocket::tokio::spawn(async move {
                // Every agent registers twice.
                handle.register(register(&format!("agent{}", i % 100))).await
            })
        });
        let outcomes = join_all(tasks)
            .await
            .into_iter()
            .map(Result::unwrap)
            .collect::<Vec<_>>();

        assert_eq!(handle.read().await.voter_count(), 100);
        assert_eq!(outcomes.iter().filter(|o| o.is_accepted()).count(), 100);
    }

    #[rocket::async_test]
    async fn concurrent_votes_are_counted_exactly() {
        let handle = ElectionHandle::default();
        for i in 0..100 {
            handle.register(register(&format!("agent{i}"))).await;
        }

        let tasks = (0..100).flat_map(|i| {
            // Each agent tries to vote twice for different candidates.
            [("X", i), ("Y", i)].map(|(candidate, i)| {
                let handle = handle.clone();
                rocket::tokio::spawn(async move {
                    handle.vote(vote(&format!("agent{i}"), candidate)).await
                })
            })
        });
        join_all(tasks).await;

        let state = handle.read().await;
        assert_eq!(state.ballot_count(), 100);
        let total: u64 = state.tally().iter().map(|(_, count)| count).sum();
        assert_eq!(total, 100);
        for i in 0..100 {
            assert!(state.ballot(&AgentId::from(format!("agent{i}").as_str())).is_some());
        }
    }
}
