use serde::Serialize;

use crate::model::election::{ElectionPhase, ElectionState, Tally, Victor};

/// A point-in-time view of the election, as returned by `GET /summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElectionSummary {
    pub phase: ElectionPhase,
    /// Registered voters.
    pub voters: usize,
    /// Ballots cast.
    pub ballots: usize,
    pub tally: Tally,
    pub victor: Victor,
}

impl From<&ElectionState> for ElectionSummary {
    fn from(state: &ElectionState) -> Self {
        Self {
            phase: state.phase(),
            voters: state.voter_count(),
            ballots: state.ballot_count(),
            tally: state.tally().clone(),
            victor: state.resolve(),
        }
    }
}
