use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpRequest, HttpResponse, Result};
use bson::{doc, oid::ObjectId};
use futures_util::TryStreamExt as _;

use crate::modules::storage;
use crate::session::{current_user, redirect};
use crate::structs::files::File;
use crate::AppState;

/// POST: /upload
///
/// Stores the single multipart field named `file` on disk, records its
/// metadata and returns to the dashboard. Any other field is ignored.
#[post("/upload")]
pub async fn upload(
    data: web::Data<AppState>,
    request: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse, Error> {
    log::debug!("POST: /upload");

    let Some(user) = current_user(&request, &data.sessions) else {
        return Ok(redirect("/login"));
    };

    let files = data.database.collection::<File>("files");

    while let Some(mut field) = payload.try_next().await? {
        if field.content_disposition().get_name() != Some("file") {
            continue;
        }

        let original_name = match field.content_disposition().get_filename() {
            Some(name) => name.to_string(),
            None => continue,
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            bytes.extend_from_slice(&chunk);
        }

        let path = data
            .uploads
            .store(&original_name, &bytes)
            .await
            .map_err(error::ErrorInternalServerError)?;

        files
            .insert_one(
                File::from(original_name.clone(), path, user.email.clone()),
                None,
            )
            .await
            .map_err(error::ErrorInternalServerError)?;

        log::info!(
            "{} uploaded {} ({} bytes)",
            user.email,
            original_name,
            bytes.len()
        );
    }

    Ok(redirect("/dashboard"))
}

/// GET: /download/{id}
///
/// Streams a stored file back under its original name. A missing record
/// yields the plain not-found message; a malformed id is an error like
/// any other.
#[get("/download/{id}")]
pub async fn download(
    data: web::Data<AppState>,
    request: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    log::debug!("GET: /download/{}", path);

    if current_user(&request, &data.sessions).is_none() {
        return Ok(redirect("/login"));
    }

    let files = data.database.collection::<File>("files");

    let id = ObjectId::parse_str(path.as_str()).map_err(error::ErrorInternalServerError)?;
    let file = files
        .find_one(doc! {"_id": id}, None)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let Some(file) = file else {
        return Ok(HttpResponse::Ok().body("File not found"));
    };

    let bytes = storage::read_stored(&file.path)
        .await
        .map_err(error::ErrorInternalServerError)?;

    log::info!("serving {} ({} bytes)", file.original_name, bytes.len());
    Ok(HttpResponse::Ok()
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.original_name),
        ))
        .content_type("application/octet-stream")
        .body(bytes))
}
