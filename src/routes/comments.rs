use axum::{
	extract::{
		rejection::{JsonRejection, PathRejection},
		Path, State,
	},
	http::StatusCode,
	Json,
};
use serde_json::Value;

use crate::{
	common::auth::CurrentUser,
	dependencies::AppState,
	domain::post::{commands::WriteComment, entity::Comment},
	services::{handlers::CommentHandler, response::ServiceError},
};

use super::{path_id, payload};

pub(super) async fn list_comments(
	State(state): State<AppState>,
	post_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<Comment>>, ServiceError> {
	Ok(Json(CommentHandler::list(state.repository.as_ref(), path_id(post_id)?).await?))
}

pub(super) async fn create_comment(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	post_id: Result<Path<i64>, PathRejection>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Comment>), ServiceError> {
	let post_id = path_id(post_id)?;
	let command: WriteComment = payload(body)?;
	let comment = CommentHandler::create(state.repository.as_ref(), &user, post_id, command).await?;
	Ok((StatusCode::CREATED, Json(comment)))
}
