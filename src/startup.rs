use mongodb::{options::ClientOptions, Client};
use tera::Tera;

use crate::config::Config;
use crate::modules::storage::UploadStore;
use crate::session::SessionStore;
use crate::AppState;

pub async fn startup() -> AppState {
    println!(
"\x1b[0;31m███████╗██╗██╗     ███████╗██████╗  ██████╗  ██████╗██╗  ██╗
██╔════╝██║██║     ██╔════╝██╔══██╗██╔═══██╗██╔════╝██║ ██╔╝
█████╗  ██║██║     █████╗  ██║  ██║██║   ██║██║     █████╔╝
██╔══╝  ██║██║     ██╔══╝  ██║  ██║██║   ██║██║     ██╔═██╗
██║     ██║███████╗███████╗██████╔╝╚██████╔╝╚██████╗██║  ██╗
╚═╝     ╚═╝╚══════╝╚══════╝╚═════╝  ╚═════╝  ╚═════╝╚═╝  ╚═╝\x1b[0m");

    println!("\x1b[0;32m[+]\x1b[0m Starting up...");
    env_logger::init();

    let mut config = match Config::get_or_create("config.toml") {
        Ok(config) => config,
        Err(_) => {
            println!("\x1b[0;31m[-]\x1b[0m Could not read config.toml");
            std::process::exit(1);
        }
    };
    config.apply_env_overrides();

    println!("\x1b[0;32m[+]\x1b[0m Connecting to mongo...");
    let client_options = match ClientOptions::parse(&config.mongo.uri).await {
        Ok(client_options) => client_options,
        Err(_) => {
            println!("\x1b[0;31m[-]\x1b[0m Could not parse the MongoDB uri");
            std::process::exit(1);
        }
    };

    let client = match Client::with_options(client_options) {
        Ok(client) => client,
        Err(_) => {
            println!("\x1b[0;31m[-]\x1b[0m Could not connect to MongoDB");
            std::process::exit(1);
        }
    };

    let database = client.database(&config.mongo.database);

    let uploads = UploadStore::new(config.files.storage_path.clone());
    if uploads.ensure_root().await.is_err() {
        println!(
            "\x1b[0;31m[-]\x1b[0m Could not create the upload directory at '{}'",
            config.files.storage_path
        );
        std::process::exit(1);
    }

    let tera = match Tera::new("templates/**/*.html") {
        Ok(tera) => tera,
        Err(_) => {
            println!("\x1b[0;31m[-]\x1b[0m Could not load the templates directory");
            std::process::exit(1);
        }
    };

    println!(
        "\x1b[0;32m[+]\x1b[0m Starting server on http://{}:{} ...",
        config.network.bind_address, config.network.bind_port
    );
    println!();

    AppState {
        database,
        config,
        tera,
        sessions: SessionStore::new(),
        uploads,
    }
}
