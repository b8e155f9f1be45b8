use log::{error, info};
use rocket::{
    fairing::{Fairing, Info, Kind},
    Build, Rocket,
};
use serde::Deserialize;

/// Default for [`Config::max_agent_id_len`].
pub const DEFAULT_MAX_AGENT_ID_LEN: usize = 256;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_agent_id_len")]
    max_agent_id_len: usize,
}

impl Config {
    /// Longest agent identifier accepted, in bytes.
    /// Configured via `MAX_AGENT_ID_LEN`.
    pub fn max_agent_id_len(&self) -> usize {
        self.max_agent_id_len
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_agent_id_len: DEFAULT_MAX_AGENT_ID_LEN,
        }
    }
}

fn default_max_agent_id_len() -> usize {
    DEFAULT_MAX_AGENT_ID_LEN
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, rocket: Rocket<Build>) -> rocket::fairing::Result {
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        if config.max_agent_id_len == 0 {
            error!("`max_agent_id_len` must be at least 1");
            return Err(rocket);
        }
        info!(
            "Loaded config, agent identifiers limited to {} bytes",
            config.max_agent_id_len
        );

        Ok(rocket.manage(config))
    }
}
