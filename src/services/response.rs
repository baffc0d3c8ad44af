use std::collections::BTreeMap;
use std::fmt::Display;

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use serde_json::json;
use validator::ValidationErrors;

pub type AnyError = dyn std::error::Error + Send + Sync + 'static;

/// Messages per offending field, rendered as `{"field": ["message", ...]}`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum ServiceError {
	NotAuthenticated,
	InvalidToken,
	EntityNotFound,
	BadRequest(String),
	ValidationError(FieldErrors),
	DatabaseError(Box<AnyError>),
	ConfigError(String),
}

impl std::error::Error for ServiceError {}

impl Display for ServiceError {
	fn fmt(
		&self,
		f: &mut std::fmt::Formatter<'_>,
	) -> std::fmt::Result {
		match self {
			ServiceError::NotAuthenticated => write!(f, "Authentication credentials were not provided."),
			ServiceError::InvalidToken => write!(f, "Given token not valid for any token type"),
			ServiceError::EntityNotFound => write!(f, "Not found."),
			ServiceError::BadRequest(res) => write!(f, "{}", res),
			ServiceError::ValidationError(fields) => write!(f, "ValidationError on {:?}", fields.keys().collect::<Vec<_>>()),
			ServiceError::DatabaseError(res) => write!(f, "{}", res),
			ServiceError::ConfigError(res) => write!(f, "{}", res),
		}
	}
}

impl ServiceError {
	pub fn status_code(&self) -> StatusCode {
		match self {
			ServiceError::NotAuthenticated | ServiceError::InvalidToken => StatusCode::UNAUTHORIZED,
			ServiceError::EntityNotFound => StatusCode::NOT_FOUND,
			ServiceError::BadRequest(_) | ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
			ServiceError::DatabaseError(_) | ServiceError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for ServiceError {
	fn into_response(self) -> Response {
		let status = self.status_code();
		match self {
			ServiceError::ValidationError(fields) => (status, Json(fields)).into_response(),
			ServiceError::DatabaseError(_) | ServiceError::ConfigError(_) => {
				tracing::error!("Request failed with server error: {}", self);
				(status, Json(json!({ "detail": "A server error occurred." }))).into_response()
			}
			other => (status, Json(json!({ "detail": other.to_string() }))).into_response(),
		}
	}
}

impl From<sqlx::Error> for ServiceError {
	fn from(value: sqlx::Error) -> Self {
		ServiceError::DatabaseError(Box::new(value))
	}
}

impl From<ValidationErrors> for ServiceError {
	fn from(value: ValidationErrors) -> Self {
		let fields = value
			.field_errors()
			.into_iter()
			.map(|(field, errors)| {
				let messages = errors
					.iter()
					.map(|error| match &error.message {
						Some(message) => message.to_string(),
						None => error.code.to_string(),
					})
					.collect();
				(field.to_string(), messages)
			})
			.collect();
		ServiceError::ValidationError(fields)
	}
}

#[cfg(test)]
mod test {
	use axum::{http::StatusCode, response::IntoResponse};
	use validator::Validate;

	use super::ServiceError;
	use crate::domain::post::commands::WritePost;

	async fn body_of(response: axum::response::Response) -> serde_json::Value {
		let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
		serde_json::from_slice(&bytes).unwrap()
	}

	#[tokio::test]
	async fn test_validation_errors_render_per_field() {
		let error: ServiceError = WritePost {
			title: None,
			content: Some("content".into()),
		}
		.validate()
		.unwrap_err()
		.into();

		let response = error.into_response();
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
		assert_eq!(body_of(response).await, serde_json::json!({ "title": ["This field is required."] }));
	}

	#[tokio::test]
	async fn test_server_errors_hide_details() {
		let response = ServiceError::DatabaseError(Box::new(sqlx::Error::PoolTimedOut)).into_response();

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body_of(response).await, serde_json::json!({ "detail": "A server error occurred." }));
	}

	#[test]
	fn test_status_codes() {
		assert_eq!(ServiceError::NotAuthenticated.status_code(), StatusCode::UNAUTHORIZED);
		assert_eq!(ServiceError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
		assert_eq!(ServiceError::EntityNotFound.status_code(), StatusCode::NOT_FOUND);
		assert_eq!(ServiceError::BadRequest("JSON parse error".into()).status_code(), StatusCode::BAD_REQUEST);
	}
}
