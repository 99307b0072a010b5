use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Fixed page size used by every listing endpoint
    pub page_size: u64,
    /// Ceiling for the evaluation retry loop on agreement creation conflicts
    pub evaluation_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(10),
            evaluation_max_attempts: env::var("EVALUATION_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(3),
        }
    }
}
