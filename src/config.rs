use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    /// Upper bound for the quantity of a single cart line.
    pub cart_max_per_line: i32,
    pub low_stock_threshold: i32,
    pub bulk_max_ids: usize,
    pub body_limit_bytes: usize,
    pub concurrency_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port: parse_or("APP_PORT", 3000),
            cart_max_per_line: parse_or("CART_MAX_PER_LINE", 10).max(1),
            low_stock_threshold: parse_or("LOW_STOCK_THRESHOLD", 5),
            bulk_max_ids: parse_or("BULK_MAX_IDS", 200),
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", 1024 * 1024),
            concurrency_limit: parse_or("CONCURRENCY_LIMIT", 100),
        })
    }

    /// Configuration with defaults for everything except the connection
    /// string and signing secret.
    pub fn with_defaults(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            cart_max_per_line: 10,
            low_stock_threshold: 5,
            bulk_max_ids: 200,
            body_limit_bytes: 1024 * 1024,
            concurrency_limit: 100,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
