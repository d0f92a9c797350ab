//! Process configuration, read once from the environment at start-up.

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::config::DEFAULT_COOKIE_NAME;
use sqlx::postgres::PgConnectOptions;
use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: PgConnectOptions,
    pub max_connections: u32,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Fails when `JWT_SECRET` is unset or blank, or any value does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET").unwrap_or_default();
        let cookie_name = var_or("COOKIE_NAME", DEFAULT_COOKIE_NAME);

        let mut auth = AuthConfig::new(secret, cookie_name)
            .context("invalid session configuration")?
            .with_cookie_secure(parse_var("COOKIE_SECURE")?.unwrap_or(!cfg!(debug_assertions)));

        if let Some(cost) = parse_var::<u32>("BCRYPT_COST")? {
            auth = auth.with_bcrypt_cost(cost).context("invalid BCRYPT_COST")?;
        }

        let bind_addr = var_or("BIND_ADDR", DEFAULT_BIND_ADDR)
            .parse()
            .context("invalid BIND_ADDR")?;

        let frontend_origins = var_or("FRONTEND_ORIGINS", DEFAULT_FRONTEND_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            bind_addr,
            database: database_options()?,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            frontend_origins,
            auth,
        })
    }
}

/// `DATABASE_URL` wins. Otherwise the `DB_*` parts are composed, with
/// libpq defaults for any that are missing.
fn database_options() -> anyhow::Result<PgConnectOptions> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return url
            .parse::<PgConnectOptions>()
            .context("invalid DATABASE_URL");
    }

    let mut options = PgConnectOptions::new();
    if let Ok(host) = env::var("DB_HOST") {
        options = options.host(&host);
    }
    if let Some(port) = parse_var::<u16>("DB_PORT")? {
        options = options.port(port);
    }
    if let Ok(user) = env::var("DB_USER") {
        options = options.username(&user);
    }
    if let Ok(password) = env::var("DB_PASSWORD") {
        options = options.password(&password);
    }
    if let Ok(name) = env::var("DB_NAME") {
        options = options.database(&name);
    }

    Ok(options)
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(e) => bail!("invalid {key} ({raw:?}): {e}"),
        },
        Err(_) => Ok(None),
    }
}
