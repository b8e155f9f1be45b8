use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use super::ballot_box::Tally;
use crate::model::common::AgentId;

/// Wire rendering of [`Victor::NoWinner`].
pub const NO_WINNER: &str = "UNKNOWN";

/// The result of resolving an election.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Victor {
    /// This candidate holds a strict majority of registered voters.
    Winner(AgentId),
    /// Nobody holds a strict majority yet.
    NoWinner,
}

impl Display for Victor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(candidate) => Display::fmt(candidate, f),
            Self::NoWinner => f.write_str(NO_WINNER),
        }
    }
}

impl Serialize for Victor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Find the candidate, if any, whose count strictly exceeds half of
/// `voter_count`.
///
/// Only the leader of the tally is considered (ties resolved by
/// [`Tally::leader`]). The comparison `count > voter_count / 2` is done as
/// `2 * count > voter_count` so that odd voter counts behave as they would
/// over the reals: with 5 voters a candidate needs 3 votes.
pub fn resolve(tally: &Tally, voter_count: usize) -> Victor {
    match tally.leader() {
        Some((candidate, count)) if has_majority(count, voter_count) => {
            Victor::Winner(candidate.clone())
        }
        _ => Victor::NoWinner,
    }
}

fn has_majority(count: u64, voter_count: usize) -> bool {
    u128::from(count) * 2 > voter_count as u128
}
