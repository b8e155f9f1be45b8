use log::warn;
use rocket::{form, http::Status, response::Responder};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl<'v> From<form::Errors<'v>> for Error {
    fn from(errors: form::Errors<'v>) -> Self {
        Self::BadRequest(errors.to_string())
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, _: &'r rocket::Request<'_>) -> rocket::response::Result<'o> {
        warn!("{self}");
        Err(match self {
            Self::BadRequest(_) => Status::BadRequest,
        })
    }
}
