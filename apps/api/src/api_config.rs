use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use mentor_application::{DEFAULT_PAGE_SIZE, ListingDefaults, parse_sort_field};
use mentor_core::AppError;
use mentor_domain::{RoleSortField, UserSortField};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: Option<String>,
    pub api_host: String,
    pub api_port: u16,
    pub frontend_url: String,
    pub listing: ListingDefaults,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = optional_env("DATABASE_URL");

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let frontend_url =
            optional_env("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".to_owned());

        let listing = load_listing_defaults()?;

        Ok(Self {
            migrate_only,
            database_url,
            api_host,
            api_port,
            frontend_url,
            listing,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

fn load_listing_defaults() -> Result<ListingDefaults, AppError> {
    let page_size = match optional_env("DEFAULT_PAGE_SIZE") {
        Some(value) => value.trim().parse::<u32>().map_err(|error| {
            AppError::validation(format!("invalid DEFAULT_PAGE_SIZE '{value}': {error}"))
        })?,
        None => DEFAULT_PAGE_SIZE,
    };

    let user_sort = match optional_env("USER_SORT_BY") {
        Some(value) => parse_sort_field::<UserSortField>(value.trim())?,
        None => UserSortField::Id,
    };
    let role_sort = match optional_env("ROLE_SORT_BY") {
        Some(value) => parse_sort_field::<RoleSortField>(value.trim())?,
        None => RoleSortField::Id,
    };

    ListingDefaults::new(page_size, user_sort, role_sort)
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

/// Reads a variable, treating blank values as unset.
fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
