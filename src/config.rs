use crate::services::response::ServiceError;

pub struct Config {
	/// Which errors we want to log
	pub log_level: String,

	/// Port server is listening to
	pub server_ip_port: String,
	pub database_url: String,
	pub database_max_connections: u32,
	/// Comma separated list of origins allowed by CORS
	pub allow_origins: String,
	/// HS256 secret access tokens are signed with
	pub jwt_secret: String,
}

impl Config {
	pub fn new() -> Result<Config, ServiceError> {
		dotenv::dotenv().ok();
		let log_level = std::env::var("LOG_LEVEL").unwrap_or("warn".to_string());
		let server_ip_port = std::env::var("SERVER_IP_PORT").unwrap_or("0.0.0.0:80".into());
		let database_url = required("DATABASE_URL")?;
		let database_max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
			Ok(value) => value
				.parse::<u32>()
				.map_err(|_| ServiceError::ConfigError(format!("DATABASE_MAX_CONNECTIONS must be a number, got `{value}`")))?,
			Err(_) => 30,
		};
		let allow_origins = std::env::var("ALLOW_ORIGINS").unwrap_or("http://localhost:3000,http://localhost:3001".to_string());
		let jwt_secret = required("JWT_SECRET")?;

		Ok(Config {
			log_level,
			server_ip_port,
			database_url,
			database_max_connections,
			allow_origins,
			jwt_secret,
		})
	}

	pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
		self.allow_origins.split(',').map(str::trim).filter(|origin| !origin.is_empty())
	}
}

fn required(key: &str) -> Result<String, ServiceError> {
	std::env::var(key).map_err(|_| ServiceError::ConfigError(format!("{key} must be set!")))
}

#[cfg(test)]
mod test {
	use super::Config;

	#[test]
	fn test_allowed_origins_are_split_and_trimmed() {
		let config = Config {
			log_level: "warn".into(),
			server_ip_port: "0.0.0.0:80".into(),
			database_url: "postgres://localhost/blog".into(),
			database_max_connections: 30,
			allow_origins: "http://localhost:3000, http://localhost:3001,".into(),
			jwt_secret: "secret".into(),
		};

		assert_eq!(config.allowed_origins().collect::<Vec<_>>(), vec!["http://localhost:3000", "http://localhost:3001"]);
	}
}
