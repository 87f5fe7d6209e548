use actix_web::{error, get, web, Error, HttpRequest, HttpResponse, Result};
use futures_util::TryStreamExt as _;
use serde::Serialize;
use tera::Context;

use crate::session::{current_user, redirect};
use crate::structs::{files::File, links::Link};
use crate::AppState;

/// Row handed to the dashboard template for one stored file.
#[derive(Serialize)]
pub struct FileRow {
    pub id: String,
    pub original_name: String,
    pub uploader: String,
    pub uploaded_at: String,
}

/// Row handed to the dashboard template for one posted link.
#[derive(Serialize)]
pub struct LinkRow {
    pub title: String,
    pub url: String,
    pub added_by: String,
    pub added_at: String,
}

/// GET: /dashboard
///
/// The shared listing of every stored file and link, for any logged-in
/// user. No per-user filtering, no pagination.
#[get("/dashboard")]
pub async fn dashboard(
    data: web::Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, Error> {
    log::debug!("GET: /dashboard");

    let Some(user) = current_user(&request, &data.sessions) else {
        return Ok(redirect("/login"));
    };

    let files = data.database.collection::<File>("files");
    let links = data.database.collection::<Link>("links");

    let mut file_rows = Vec::new();
    let mut cursor = files
        .find(None, None)
        .await
        .map_err(error::ErrorInternalServerError)?;
    while let Some(file) = cursor
        .try_next()
        .await
        .map_err(error::ErrorInternalServerError)?
    {
        file_rows.push(FileRow {
            id: file._id.to_hex(),
            original_name: file.original_name.clone(),
            uploader: file.uploader().to_string(),
            uploaded_at: file.uploaded_at.to_rfc2822(),
        });
    }

    let mut link_rows = Vec::new();
    let mut cursor = links
        .find(None, None)
        .await
        .map_err(error::ErrorInternalServerError)?;
    while let Some(link) = cursor
        .try_next()
        .await
        .map_err(error::ErrorInternalServerError)?
    {
        link_rows.push(LinkRow {
            title: link.title.clone(),
            url: link.url.clone(),
            added_by: link.added_by().to_string(),
            added_at: link.added_at.to_rfc2822(),
        });
    }

    let mut context = Context::new();
    context.insert("user", &user.email);
    context.insert("files", &file_rows);
    context.insert("links", &link_rows);

    let html = data
        .tera
        .render("dashboard.html", &context)
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}
