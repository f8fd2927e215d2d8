//! Helpers for integration tests.
#![allow(dead_code)]

use std::net::TcpListener;

use smart_inventory::app;
use smart_inventory::db::{DbPool, establish_connection_pool, run_migrations};
use smart_inventory::models::config::ServerConfig;
use smart_inventory::repository::DieselRepository;
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

/// A running server on a random local port, backed by its own database.
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
}

/// Start the application inside the current Actix runtime.
pub fn spawn_app() -> TestApp {
    let db = TestDb::new();
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let config = ServerConfig {
        address: "127.0.0.1".into(),
        port,
        database_url: String::new(),
        templates_dir: "templates/**/*".into(),
        assets_dir: "assets".into(),
        secret_key: "test-secret-".repeat(8),
    };

    let server = app::run(listener, DieselRepository::new(db.pool()), &config)
        .expect("Failed to build server");
    actix_web::rt::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        db,
    }
}
