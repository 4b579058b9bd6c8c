use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref DATABASE_URL: Option<Secret<String>> = get_db_url();
    pub static ref APP_ADDRESS: String =
        load_or_default(env::APP_ADDRESS_ENV_VAR, prod::APP_ADDRESS);
    pub static ref ALLOWED_ORIGINS: Vec<String> = load_allowed_origins();
}

fn load_env() {
    dotenv().ok();
}

/// Without a database URL the service falls back to the in-memory store.
fn get_db_url() -> Option<Secret<String>> {
    load_env();
    std_env::var(env::DATABASE_URL_ENV_VAR)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(Secret::new)
}

fn load_or_default(variable_name: &str, default_value: &str) -> String {
    load_env();

    match std_env::var(variable_name) {
        Ok(value) if !value.is_empty() => value,
        _ => String::from(default_value),
    }
}

fn load_allowed_origins() -> Vec<String> {
    load_or_default(env::ALLOWED_ORIGINS_ENV_VAR, DEFAULT_ALLOWED_ORIGINS)
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}

pub mod env {
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const APP_ADDRESS_ENV_VAR: &str = "APP_ADDRESS";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "ALLOWED_ORIGINS";
}

pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://127.0.0.1:3000";
pub const MAX_DB_CONNECTIONS: u32 = 5;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
