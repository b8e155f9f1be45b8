use log::info;
use rocket::{
    data::{Data, Limits},
    form::{Errors, Form, FromForm},
    serde::json::Json,
    Route, State,
};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::RequestId;
use crate::model::{
    api::{
        command::{MemberForm, RegisterCommand, VoteCommand, VoteForm},
        summary::ElectionSummary,
    },
    election::ElectionHandle,
};

pub fn routes() -> Vec<Route> {
    routes![
        member,
        member_untyped,
        vote,
        vote_untyped,
        victor,
        reset,
        summary,
    ]
}

/// Register an agent as a voter. Rejections are silent.
#[post("/member", data = "<form>")]
async fn member(
    id: &RequestId,
    form: std::result::Result<Form<MemberForm>, Errors<'_>>,
    config: &State<Config>,
    election: &State<ElectionHandle>,
) -> Result<()> {
    register(id, form?.into_inner(), config, election).await
}

/// `POST /member` without a form content type: the body is still read as
/// urlencoded.
#[post("/member", data = "<body>", rank = 2)]
async fn member_untyped(
    id: &RequestId,
    body: Data<'_>,
    limits: &Limits,
    config: &State<Config>,
    election: &State<ElectionHandle>,
) -> Result<()> {
    let raw = read_body(body, limits).await?;
    register(id, parse_urlencoded(&raw)?, config, election).await
}

/// Cast a ballot. Rejections are silent.
#[post("/vote", data = "<form>")]
async fn vote(
    id: &RequestId,
    form: std::result::Result<Form<VoteForm>, Errors<'_>>,
    config: &State<Config>,
    election: &State<ElectionHandle>,
) -> Result<()> {
    cast_ballot(id, form?.into_inner(), config, election).await
}

/// `POST /vote` without a form content type: the body is still read as
/// urlencoded.
#[post("/vote", data = "<body>", rank = 2)]
async fn vote_untyped(
    id: &RequestId,
    body: Data<'_>,
    limits: &Limits,
    config: &State<Config>,
    election: &State<ElectionHandle>,
) -> Result<()> {
    let raw = read_body(body, limits).await?;
    cast_ballot(id, parse_urlencoded(&raw)?, config, election).await
}

/// The current majority winner, or `UNKNOWN`.
#[get("/victor")]
async fn victor(election: &State<ElectionHandle>) -> String {
    election.resolve().await.to_string()
}

#[post("/rst")]
async fn reset(id: &RequestId, election: &State<ElectionHandle>) {
    election.reset().await;
    info!("{id} reset");
}

#[get("/summary")]
async fn summary(election: &State<ElectionHandle>) -> Json<ElectionSummary> {
    Json(election.summary().await)
}

async fn register(
    id: &RequestId,
    form: MemberForm,
    config: &Config,
    election: &ElectionHandle,
) -> Result<()> {
    let command = RegisterCommand::from_form(form, config)?;
    let outcome = election.register(command).await;
    info!("{id} register: {outcome}");
    Ok(())
}

async fn cast_ballot(
    id: &RequestId,
    form: VoteForm,
    config: &Config,
    election: &ElectionHandle,
) -> Result<()> {
    let command = VoteCommand::from_form(form, config)?;
    let outcome = election.vote(command).await;
    info!("{id} vote: {outcome}");
    Ok(())
}

/// Read a whole request body, capped at the configured form limit.
async fn read_body(body: Data<'_>, limits: &Limits) -> Result<String> {
    let limit = limits.get("form").unwrap_or(Limits::FORM);
    let raw = body
        .open(limit)
        .into_string()
        .await
        .map_err(|e| Error::BadRequest(format!("unreadable body: {e}")))?;
    if !raw.is_complete() {
        return Err(Error::BadRequest(format!("body exceeds {limit}")));
    }
    Ok(raw.into_inner())
}

/// Leniently parse an urlencoded form body, as `Form` would.
fn parse_urlencoded<'r, T: FromForm<'r>>(raw: &'r str) -> Result<T> {
    Ok(Form::<T>::parse(raw)?)
}
