use actix_web::{error, post, web, Error, HttpRequest, HttpResponse, Result};

use crate::session::{current_user, redirect};
use crate::structs::links::{Link, LinkForm};
use crate::AppState;

/// POST: /add-link
///
/// Records an external link under the posting user's email and returns
/// to the dashboard.
#[post("/add-link")]
pub async fn add_link(
    data: web::Data<AppState>,
    request: HttpRequest,
    form: web::Form<LinkForm>,
) -> Result<HttpResponse, Error> {
    log::debug!("POST: /add-link");

    let Some(user) = current_user(&request, &data.sessions) else {
        return Ok(redirect("/login"));
    };

    let links = data.database.collection::<Link>("links");
    links
        .insert_one(
            Link::from(form.title.clone(), form.url.clone(), user.email.clone()),
            None,
        )
        .await
        .map_err(error::ErrorInternalServerError)?;

    log::info!("{} added link {}", user.email, form.url);
    Ok(redirect("/dashboard"))
}
