use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Result of a mutating election operation.
///
/// Everything other than `Accepted` is a silent rejection: the state is
/// untouched and nothing is surfaced over the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The state was mutated.
    Accepted,
    /// The agent was already a member.
    AlreadyRegistered,
    /// Registration attempted after the first ballot was cast.
    RegistrationClosed,
    /// The voter is not a member.
    NotEligible,
    /// The voter has already cast a ballot.
    AlreadyVoted,
}

impl Outcome {
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Accepted => "accepted",
            Self::AlreadyRegistered => "already registered",
            Self::RegistrationClosed => "registration closed",
            Self::NotEligible => "not eligible",
            Self::AlreadyVoted => "already voted",
        };
        f.write_str(s)
    }
}
