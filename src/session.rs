use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use bson::oid::ObjectId;
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "sid";

/// Identity attached to a live session.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: ObjectId,
    pub email: String,
}

/// In-process session table keyed by the opaque id the browser holds in
/// the `sid` cookie. Entries live for the lifetime of the process; a
/// restart logs everyone out.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionUser>>>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore::default()
    }

    /// Creates a session for `user` and returns its id.
    pub fn create(&self, user: SessionUser) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().unwrap().insert(id, user);
        id
    }

    /// Looks up the session for `id`. A `Some` here is the entire
    /// authorization model: logged in, with every capability.
    pub fn get(&self, id: &Uuid) -> Option<SessionUser> {
        self.inner.read().unwrap().get(id).cloned()
    }

    /// Destroys the session for `id`, returning whether one existed.
    pub fn destroy(&self, id: &Uuid) -> bool {
        self.inner.write().unwrap().remove(id).is_some()
    }
}

/// Builds the `sid` cookie for a freshly created session. Expiry is left
/// to the browser session.
pub fn session_cookie(id: Uuid) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, id.to_string())
        .path("/")
        .http_only(true)
        .finish()
}

/// Session id claimed by the request, if the cookie is present and well
/// formed.
pub fn session_id(request: &HttpRequest) -> Option<Uuid> {
    let cookie = request.cookie(SESSION_COOKIE)?;
    Uuid::parse_str(cookie.value()).ok()
}

/// Resolves the requesting user against the session table.
pub fn current_user(request: &HttpRequest, sessions: &SessionStore) -> Option<SessionUser> {
    sessions.get(&session_id(request)?)
}

/// 302 redirect, the response every navigation flow ends with.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;

    use super::*;

    fn some_user() -> SessionUser {
        SessionUser {
            user_id: ObjectId::new(),
            email: String::from("a@example.com"),
        }
    }

    #[test]
    fn created_session_resolves_to_its_user() {
        let store = SessionStore::new();
        let id = store.create(some_user());

        let user = store.get(&id).unwrap();
        assert_eq!(user.email, "a@example.com");
    }

    #[test]
    fn unknown_id_resolves_to_none() {
        let store = SessionStore::new();
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn destroyed_session_is_gone() {
        let store = SessionStore::new();
        let id = store.create(some_user());

        assert!(store.destroy(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.destroy(&id));
    }

    #[test]
    fn sessions_are_independent() {
        let store = SessionStore::new();
        let first = store.create(some_user());
        let second = store.create(SessionUser {
            user_id: ObjectId::new(),
            email: String::from("b@example.com"),
        });

        store.destroy(&first);
        assert_eq!(store.get(&second).unwrap().email, "b@example.com");
    }

    #[test]
    fn redirect_is_a_found_with_location() {
        let response = redirect("/login");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = session_cookie(Uuid::new_v4());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
    }
}
