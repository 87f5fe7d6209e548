use actix_web::{web, App, HttpServer};
use mongodb::Database;
use tera::Tera;

mod config;
mod modules;
mod routes;
mod session;
mod startup;
mod structs;

pub use config::Config;

use modules::storage::UploadStore;
use session::SessionStore;

/// Shared application context, built once at startup and handed to every
/// handler through `web::Data`. No module-level state anywhere.
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub config: Config,
    pub tera: Tera,
    pub sessions: SessionStore,
    pub uploads: UploadStore,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let appstate = startup::startup().await;
    let bind = (
        appstate.config.network.bind_address.clone(),
        appstate.config.network.bind_port,
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(appstate.clone()))
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
