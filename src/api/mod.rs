use rocket::Route;

mod election;

pub fn routes() -> Vec<Route> {
    let mut routes = Vec::new();
    routes.extend(election::routes());
    routes
}
