use log::{info, warn};
use std::env;

/// Smallest secret accepted for deriving the cookie encryption key.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub host: String,
    pub scheme: String,
    pub data_dir: String,
    pub database_url: String,
    pub pool_size: u32,
    pub bcrypt_cost: u32,
    pub session_ttl_days: i64,
    pub secret_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            scheme: "http".to_string(),
            data_dir: "./data".to_string(),
            database_url: "./data/modhub.db".to_string(),
            pool_size: 10,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            session_ttl_days: 7,
            secret_key: None,
        }
    }
}

impl AppConfig {
    pub fn get_scheme(&self) -> &str {
        &self.scheme
    }

    /// Session cookies carry the `Secure` attribute only when served over https.
    pub fn secure_cookies(&self) -> bool {
        self.scheme == "https"
    }

    pub fn from_env() -> Self {
        let port = env::var("MODHUB_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .unwrap_or(8000);

        let host = env::var("MODHUB_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        // Auto-detect scheme based on port or explicit configuration
        let scheme = env::var("MODHUB_SCHEME").unwrap_or_else(|_| {
            if port == 443 {
                "https".to_string()
            } else {
                "http".to_string()
            }
        });

        let data_dir = env::var("MODHUB_DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        let database_url =
            env::var("MODHUB_DATABASE_URL").unwrap_or_else(|_| format!("{data_dir}/modhub.db"));

        let pool_size = env::var("MODHUB_POOL_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .ok()
            .filter(|size| *size > 0)
            .unwrap_or(10);

        let bcrypt_cost = env::var("MODHUB_BCRYPT_COST")
            .ok()
            .and_then(|cost| cost.parse::<u32>().ok())
            .unwrap_or(bcrypt::DEFAULT_COST)
            .clamp(4, 31);

        let session_ttl_days = env::var("MODHUB_SESSION_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse::<i64>()
            .ok()
            .filter(|days| *days > 0)
            .unwrap_or(7);

        let secret_key = env::var("MODHUB_SECRET_KEY").ok().and_then(|key| {
            if key.len() < MIN_SECRET_KEY_LEN {
                warn!(
                    "MODHUB_SECRET_KEY ignored: must be at least {MIN_SECRET_KEY_LEN} bytes long"
                );
                None
            } else {
                Some(key)
            }
        });

        info!("Configuration loaded:");
        info!("  Host: {host}");
        info!("  Port: {port}");
        info!("  Scheme: {scheme}");
        info!("  Data Directory: {data_dir}");
        info!("  Database URL: {database_url}");
        info!("  Pool Size: {pool_size}");
        info!("  Bcrypt Cost: {bcrypt_cost}");
        info!("  Session TTL: {session_ttl_days} days");
        info!(
            "  Secret Key: {}",
            if secret_key.is_some() { "configured" } else { "not set" }
        );

        Self {
            port,
            host,
            scheme,
            data_dir,
            database_url,
            pool_size,
            bcrypt_cost,
            session_ttl_days,
            secret_key,
        }
    }
}
