use actix_web::{get, HttpResponse};

use crate::session::redirect;

/// GET: /
///
/// Everything starts at the dashboard.
#[get("/")]
pub async fn index() -> HttpResponse {
    redirect("/dashboard")
}
