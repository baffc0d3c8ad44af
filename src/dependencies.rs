use std::sync::{Arc, OnceLock};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
	adapters::repositories::{BlogRepository, Repository},
	common::token::TokenKeys,
	config::Config,
	services::response::ServiceError,
};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
	pub repository: Arc<dyn BlogRepository>,
	pub tokens: TokenKeys,
}

impl AppState {
	pub fn new(
		repository: impl BlogRepository + 'static,
		tokens: TokenKeys,
	) -> Self {
		Self {
			repository: Arc::new(repository),
			tokens,
		}
	}

	/// State backed by the Postgres pool.
	pub async fn from_config() -> Result<Self, ServiceError> {
		let config = config()?;
		let pool = connection_pool().await?;
		Ok(Self::new(Repository::new(pool.clone()), TokenKeys::from_secret(config.jwt_secret.as_bytes())))
	}
}

pub fn config() -> Result<&'static Config, ServiceError> {
	static CONFIG: OnceLock<Config> = OnceLock::new();
	let config = match CONFIG.get() {
		None => {
			let config = Config::new()?;

			CONFIG.get_or_init(|| config)
		}
		Some(config) => config,
	};
	Ok(config)
}

pub async fn connection_pool() -> Result<&'static PgPool, ServiceError> {
	static POOL: OnceLock<PgPool> = OnceLock::new();

	let p = match POOL.get() {
		None => {
			let config = config()?;
			let pool = PgPoolOptions::new()
				.max_connections(config.database_max_connections)
				.connect(&config.database_url)
				.await?;
			POOL.get_or_init(|| pool)
		}
		Some(pool) => pool,
	};
	Ok(p)
}
