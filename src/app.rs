//! Assembly of the Actix-web application.

use std::net::TcpListener;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::api::inventory_gateway;
use crate::routes::items::{create_item, delete_item, update_item};
use crate::routes::main::index;

/// Derive the cookie signing key from the configured secret.
///
/// A missing or short secret falls back to a random key, which invalidates
/// pending flash messages on restart.
fn signing_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(e) => {
            log::warn!("Unusable secret_key ({e}), generating a random signing key");
            Key::generate()
        }
    }
}

/// Build the server on an already bound listener.
///
/// The caller awaits the returned [`Server`]; tests spawn it instead.
pub fn run(
    listener: TcpListener,
    repo: DieselRepository,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let tera = Tera::new(&config.templates_dir).map_err(|e| {
        log::error!("Failed to parse templates from {}: {e}", config.templates_dir);
        std::io::Error::other(e)
    })?;

    let message_store = CookieMessageStore::builder(signing_key(&config.secret_key)).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let repo = web::Data::new(repo);
    let tera = web::Data::new(tera);
    let assets_dir = config.assets_dir.clone();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(Logger::default())
            .service(Files::new("/assets", assets_dir.clone()))
            .service(web::resource("/api/inventory").route(web::route().to(inventory_gateway)))
            .service(index)
            .service(create_item)
            .service(update_item)
            .service(delete_item)
            .app_data(repo.clone())
            .app_data(tera.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
