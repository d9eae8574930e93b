pub mod config;
pub mod database;
pub mod error;
pub mod fairings;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod state;

use rocket::config::SecretKey;
use rocket::{Build, Config, Rocket};
use rocket_cors::{AllowedOrigins, CorsOptions};
use std::net::IpAddr;

pub use config::AppConfig;
pub use database::DatabaseService;
pub use fairings::RequestLogger;
pub use state::AppState;

/// Builds the application from environment configuration.
pub fn create_rocket() -> Result<Rocket<Build>, Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = AppConfig::from_env();

    std::fs::create_dir_all(&config.data_dir)?;

    // Initialize database service
    let database = DatabaseService::new(&config.database_url, config.pool_size)?;

    build_rocket(AppState::new(config, database))
}

/// Builds the application around an already initialised state.
pub fn build_rocket(state: AppState) -> Result<Rocket<Build>, Box<dyn std::error::Error>> {
    // Configure CORS
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::all())
        .to_cors()?;

    let rocket_config = server_config(&state.config, Config::default())?;

    Ok(rocket::custom(&rocket_config)
        .manage(state)
        .attach(cors)
        .attach(RequestLogger)
        .mount("/", routes::get_routes())
        .register("/", routes::catchers::get_catchers()))
}

/// Applies host, port and cookie key on top of a Rocket profile's defaults.
///
/// Private cookies need a stable key outside the debug profile, so a missing
/// `MODHUB_SECRET_KEY` is a startup error there.
fn server_config(config: &AppConfig, base: Config) -> Result<Config, Box<dyn std::error::Error>> {
    let address: IpAddr = config.host.parse()?;

    let mut rocket_config = Config {
        port: config.port,
        address,
        ..base
    };

    match &config.secret_key {
        Some(secret) => rocket_config.secret_key = SecretKey::derive_from(secret.as_bytes()),
        None if rocket_config.profile != Config::DEBUG_PROFILE => {
            return Err(format!(
                "MODHUB_SECRET_KEY (at least {} bytes) is required in the {} profile",
                crate::config::MIN_SECRET_KEY_LEN,
                rocket_config.profile
            )
            .into());
        }
        None => {}
    }

    Ok(rocket_config)
}
