use actix_web::http::header;
use actix_web::{error, get, post, web, Error, HttpRequest, HttpResponse, Result};
use bson::doc;
use tera::Context;

use crate::modules::auth::{hash_password, verify_password};
use crate::session::{self, redirect, SessionUser};
use crate::structs::users::{CredentialsForm, User};
use crate::AppState;

/// GET: /register
///
/// Renders the registration form.
#[get("/register")]
pub async fn register_form(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    log::debug!("GET: /register");

    let html = data
        .tera
        .render("register.html", &Context::new())
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// POST: /register
///
/// Hashes the password, stores the account and sends the browser to the
/// login form. Nothing checks whether the email is already taken.
#[post("/register")]
pub async fn register(
    data: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, Error> {
    log::debug!("POST: /register");
    let users = data.database.collection::<User>("users");

    let hashed = hash_password(&form.password).map_err(error::ErrorInternalServerError)?;
    users
        .insert_one(User::from(form.email.clone(), hashed), None)
        .await
        .map_err(error::ErrorInternalServerError)?;

    log::info!("registered {}", form.email);
    Ok(redirect("/login"))
}

/// GET: /login
///
/// Renders the login form.
#[get("/login")]
pub async fn login_form(data: web::Data<AppState>) -> Result<HttpResponse, Error> {
    log::debug!("GET: /login");

    let html = data
        .tera
        .render("login.html", &Context::new())
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// POST: /login
///
/// On success a session is created and the browser is sent to the
/// dashboard with its `sid` cookie set. On failure the body is the plain
/// invalid-credentials message.
#[post("/login")]
pub async fn login(
    data: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> Result<HttpResponse, Error> {
    log::debug!("POST: /login");
    let users = data.database.collection::<User>("users");

    let user = users
        .find_one(doc! {"email": &form.email}, None)
        .await
        .map_err(error::ErrorInternalServerError)?;

    match user {
        Some(user) if verify_password(&form.password, &user.password) => {
            let id = data.sessions.create(SessionUser {
                user_id: user._id,
                email: user.email.clone(),
            });

            log::info!("{} logged in", user.email);
            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, "/dashboard"))
                .cookie(session::session_cookie(id))
                .finish())
        }
        _ => Ok(HttpResponse::Ok().body("Invalid credentials")),
    }
}

/// GET: /logout
///
/// Destroys the session and clears the cookie.
#[get("/logout")]
pub async fn logout(
    data: web::Data<AppState>,
    request: HttpRequest,
) -> Result<HttpResponse, Error> {
    log::debug!("GET: /logout");

    let Some(id) = session::session_id(&request) else {
        return Ok(redirect("/login"));
    };
    if !data.sessions.destroy(&id) {
        return Ok(redirect("/login"));
    }

    let mut cookie = session::session_cookie(id);
    cookie.make_removal();

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, "/login"))
        .cookie(cookie)
        .finish())
}
