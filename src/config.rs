use std::env;

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: String,
    pub database_path: String,
    pub jwt_secret: String,
    pub seed_username: String,
    pub seed_password: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT").unwrap_or_else(|_| "8000".to_string()),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "./books.db".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "secret_key".to_string()),
            seed_username: env::var("SEED_USERNAME").unwrap_or_else(|_| "user1".to_string()),
            seed_password: env::var("SEED_PASSWORD").unwrap_or_else(|_| "password123".to_string()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
