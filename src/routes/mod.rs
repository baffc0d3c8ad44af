mod comments;
mod likes;
mod posts;

use axum::{
	extract::{
		rejection::{JsonRejection, PathRejection},
		Path,
	},
	routing::get,
	Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
	dependencies::AppState,
	services::response::{FieldErrors, ServiceError},
};

pub fn create_routes(state: AppState) -> Router {
	Router::new()
		.route("/posts", get(posts::list_posts).post(posts::create_post))
		.route(
			"/posts/:id",
			get(posts::retrieve_post)
				.put(posts::update_post)
				.patch(posts::partial_update_post)
				.delete(posts::delete_post),
		)
		.route("/posts/:post_id/comments", get(comments::list_comments).post(comments::create_comment))
		.route("/posts/:post_id/likes", get(likes::list_likes).post(likes::create_like))
		.with_state(state)
}

/// Decodes a JSON object body into `T`.
///
/// Unparsable JSON is a plain 400; a field of the wrong type is reported
/// against that field, like any other validation error.
pub(crate) fn payload<T: DeserializeOwned>(body: Result<Json<Value>, JsonRejection>) -> Result<T, ServiceError> {
	let Json(value) = body.map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))?;

	let kind = match &value {
		Value::Object(_) => None,
		Value::Array(_) => Some("list"),
		Value::String(_) => Some("str"),
		Value::Number(_) => Some("number"),
		Value::Bool(_) => Some("bool"),
		Value::Null => Some("null"),
	};
	if let Some(kind) = kind {
		return Err(ServiceError::ValidationError(FieldErrors::from([(
			"non_field_errors".to_string(),
			vec![format!("Invalid data. Expected a dictionary, but got {kind}.")],
		)])));
	}

	serde_path_to_error::deserialize(value).map_err(|err| {
		ServiceError::ValidationError(FieldErrors::from([(err.path().to_string(), vec![err.inner().to_string()])]))
	})
}

/// Ids in the path are integers; anything else names no resource.
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ServiceError> {
	match path {
		Ok(Path(id)) => Ok(id),
		Err(rejection) => {
			tracing::debug!("Unresolvable path id: {}", rejection.body_text());
			Err(ServiceError::EntityNotFound)
		}
	}
}
