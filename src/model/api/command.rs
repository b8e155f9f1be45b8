use crate::config::Config;
use crate::error::Result;
use crate::model::common::AgentId;

/// Raw form body of `POST /member`.
#[derive(Debug, FromForm)]
pub struct MemberForm {
    pub agent: String,
}

/// Raw form body of `POST /vote`.
#[derive(Debug, FromForm)]
pub struct VoteForm {
    pub agent: String,
    pub vote: String,
}

/// A validated request to admit an agent as a voter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCommand {
    pub agent_id: AgentId,
}

impl RegisterCommand {
    pub fn from_form(form: MemberForm, config: &Config) -> Result<Self> {
        Ok(Self {
            agent_id: AgentId::parse(form.agent, config.max_agent_id_len())?,
        })
    }
}

/// A validated request for one voter to back one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteCommand {
    pub voter_id: AgentId,
    pub candidate_id: AgentId,
}

impl VoteCommand {
    pub fn from_form(form: VoteForm, config: &Config) -> Result<Self> {
        let max_len = config.max_agent_id_len();
        Ok(Self {
            voter_id: AgentId::parse(form.agent, max_len)?,
            candidate_id: AgentId::parse(form.vote, max_len)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn register_command_from_form() {
        let form = MemberForm {
            agent: "alice".to_string(),
        };
        let command = RegisterCommand::from_form(form, &Config::default()).unwrap();
        assert_eq!(command.agent_id, AgentId::from("alice"));
    }

    #[test]
    fn vote_command_validates_both_fields() {
        let config = Config::example(4);

        let ok = VoteForm {
            agent: "bob".to_string(),
            vote: "carl".to_string(),
        };
        let command = VoteCommand::from_form(ok, &config).unwrap();
        assert_eq!(command.voter_id, AgentId::from("bob"));
        assert_eq!(command.candidate_id, AgentId::from("carl"));

        let empty_candidate = VoteForm {
            agent: "bob".to_string(),
            vote: String::new(),
        };
        let command = VoteCommand::from_form(empty_candidate, &config).unwrap();
        assert_eq!(command.candidate_id, AgentId::from(""));

        let long_candidate = VoteForm {
            agent: "bob".to_string(),
            vote: "carla".to_string(),
        };
        assert!(matches!(
            VoteCommand::from_form(long_candidate, &config),
            Err(Error::BadRequest(_))
        ));

        let long_voter = VoteForm {
            agent: "bobby".to_string(),
            vote: "carl".to_string(),
        };
        assert!(matches!(
            VoteCommand::from_form(long_voter, &config),
            Err(Error::BadRequest(_))
        ));
    }
}
