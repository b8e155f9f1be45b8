use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An opaque agent identifier. Voters and candidates share this namespace.
///
/// Ordering is lexicographic on the raw string, which is what tie-breaks
/// between equally-ranked candidates rely on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Validate a raw identifier received at the transport boundary.
    ///
    /// The identifier is kept verbatim, empty included; it must be at most
    /// `max_len` bytes long.
    pub fn parse(raw: impl Into<String>, max_len: usize) -> Result<Self> {
        let raw = raw.into();
        if raw.len() > max_len {
            return Err(Error::BadRequest(format!(
                "agent identifier is {} bytes, limit is {max_len}",
                raw.len()
            )));
        }
        Ok(Self(raw))
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
