pub mod dashboard;
pub mod files;
pub mod index;
pub mod links;
pub mod users;

use actix_web::web;

/// Registers every route on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index::index)
        .service(users::register_form)
        .service(users::register)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(dashboard::dashboard)
        .service(files::upload)
        .service(files::download)
        .service(links::add_link);
}

#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use mongodb::Client;
    use tera::Tera;

    use crate::modules::storage::UploadStore;
    use crate::session::SessionStore;
    use crate::{AppState, Config};

    // The mongo client connects lazily, so a state over the default uri
    // is fine for every path that never reaches a query.
    async fn state() -> AppState {
        let config = Config::default();
        let client = Client::with_uri_str(&config.mongo.uri).await.unwrap();
        let database = client.database(&config.mongo.database);

        AppState {
            database,
            tera: Tera::new("templates/**/*.html").unwrap(),
            sessions: SessionStore::new(),
            uploads: UploadStore::new(config.files.storage_path.clone()),
            config,
        }
    }

    #[actix_web::test]
    async fn index_redirects_to_dashboard() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state().await))
                .configure(super::configure),
        )
        .await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
    }

    #[actix_web::test]
    async fn protected_get_routes_redirect_anonymous_visitors_to_login() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state().await))
                .configure(super::configure),
        )
        .await;

        for uri in [
            "/dashboard",
            "/logout",
            "/download/0123456789abcdef01234567",
        ] {
            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

            assert_eq!(response.status(), StatusCode::FOUND, "{}", uri);
            assert_eq!(
                response.headers().get(header::LOCATION).unwrap(),
                "/login",
                "{}",
                uri
            );
        }
    }

    #[actix_web::test]
    async fn anonymous_link_post_redirects_to_login() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state().await))
                .configure(super::configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/add-link")
            .set_form([("title", "Example"), ("url", "https://example.com")])
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[actix_web::test]
    async fn anonymous_upload_redirects_to_login() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state().await))
                .configure(super::configure),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/upload")
            .insert_header((header::CONTENT_TYPE, "multipart/form-data; boundary=xyz"))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }

    #[actix_web::test]
    async fn register_and_login_forms_render() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state().await))
                .configure(super::configure),
        )
        .await;

        for uri in ["/register", "/login"] {
            let response =
                test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);

            let body = test::read_body(response).await;
            let body = std::str::from_utf8(&body).unwrap();
            assert!(body.contains("<form"), "{}", uri);
            assert!(body.contains("password"), "{}", uri);
        }
    }
}
