use std::env;
use std::net::TcpListener;

use config::{Config, Environment, File};
use dotenvy::dotenv;

use smart_inventory::app;
use smart_inventory::db::{establish_connection_pool, run_migrations};
use smart_inventory::models::config::ServerConfig;
use smart_inventory::repository::DieselRepository;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from `.env` in local development.
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(File::with_name("config/default"))
        .add_source(File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(Environment::with_prefix("APP"))
        .build();

    let server_config = match settings.and_then(|s| s.try_deserialize::<ServerConfig>()) {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load server config: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let migrated = pool
        .get()
        .map_err(|e| e.to_string())
        .and_then(|mut conn| run_migrations(&mut conn).map_err(|e| e.to_string()));
    if let Err(e) = migrated {
        log::error!("Failed to run database migrations: {e}");
        std::process::exit(1);
    }

    let address = format!("{}:{}", server_config.address, server_config.port);
    let listener = TcpListener::bind(&address)?;
    log::info!("Starting inventory server on http://{address}");

    app::run(listener, DieselRepository::new(pool), &server_config)?.await
}
