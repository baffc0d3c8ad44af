use std::{net::SocketAddr, str::FromStr};

use axum::{
	http::{
		header::{AUTHORIZATION, CONTENT_TYPE},
		HeaderValue, Method,
	},
	Router,
};

use blog::{
	dependencies::{config, connection_pool, AppState},
	routes::create_routes,
	services::response::ServiceError,
};
use tower_http::{
	cors::{AllowOrigin, CorsLayer},
	trace::TraceLayer,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
	println!("Environment Variable Is Being Set...");
	dotenv::dotenv().ok();
	let config = config()?;

	// ! Tracing
	tracing_subscriber::registry()
		.with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			// axum logs rejections from built-in extractors with the `axum::rejection`
			// target, at `TRACE` level. `axum::rejection=trace` enables showing those events
			format!("{},blog=info,tower_http=debug,axum::rejection=trace", config.log_level).into()
		}))
		.with(tracing_subscriber::fmt::layer())
		.init();

	// ! Connection
	tracing::info!("Connections Are Being Pooled...");
	let pool = connection_pool().await?;
	sqlx::migrate!("./migrations")
		.run(pool)
		.await
		.map_err(|err| ServiceError::DatabaseError(Box::new(err)))?;

	let state = AppState::from_config().await?;

	let origins = config
		.allowed_origins()
		.map(|origin| {
			origin
				.parse::<HeaderValue>()
				.map_err(|_| ServiceError::ConfigError(format!("Invalid origin in ALLOW_ORIGINS: `{origin}`")))
		})
		.collect::<Result<Vec<_>, _>>()?;

	let app = Router::new()
		.merge(create_routes(state))
		.layer(
			CorsLayer::new()
				.allow_origin(AllowOrigin::list(origins))
				.allow_methods([Method::GET, Method::POST, Method::PATCH, Method::PUT, Method::DELETE])
				.allow_headers([AUTHORIZATION, CONTENT_TYPE]),
		)
		.layer(TraceLayer::new_for_http());

	let addr = SocketAddr::from_str(&config.server_ip_port)
		.map_err(|_| ServiceError::ConfigError(format!("Invalid SERVER_IP_PORT: `{}`", config.server_ip_port)))?;

	tracing::info!("Start Web Server on {}...", addr);
	axum::Server::try_bind(&addr)
		.map_err(|err| ServiceError::ConfigError(err.to_string()))?
		.serve(app.into_make_service())
		.with_graceful_shutdown(shutdown_signal())
		.await
		.map_err(|err| ServiceError::ConfigError(err.to_string()))
}

async fn shutdown_signal() {
	if let Err(err) = tokio::signal::ctrl_c().await {
		tracing::error!("Failed to listen for shutdown signal: {}", err);
	}
	tracing::info!("Shutting down...");
}
