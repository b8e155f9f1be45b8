//! The election core: who may vote, what they voted for, and who has won.

mod ballot_box;
mod handle;
mod outcome;
mod registry;
mod resolver;
mod state;

pub use ballot_box::{BallotBox, Tally};
pub use handle::ElectionHandle;
pub use outcome::Outcome;
pub use registry::MemberRegistry;
pub use resolver::{resolve, Victor, NO_WINNER};
pub use state::{ElectionPhase, ElectionState};
