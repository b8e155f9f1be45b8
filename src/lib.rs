#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

use crate::config::ConfigFairing;
use crate::logging::LoggerFairing;
use crate::model::election::ElectionHandle;

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;

pub use config::Config;

/// Build the server around a fresh, empty election.
pub fn build() -> Rocket<Build> {
    rocket_for_election(ElectionHandle::default())
}

/// Build the server around an existing election handle.
pub(crate) fn rocket_for_election(election: ElectionHandle) -> Rocket<Build> {
    rocket::build()
        .mount("/", api::routes())
        .attach(ConfigFairing)
        .attach(LoggerFairing)
        .manage(election)
}
