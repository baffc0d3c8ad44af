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
	domain::post::{
		commands::{PatchPost, WritePost},
		PostAggregate,
	},
	services::{handlers::PostHandler, response::ServiceError},
};

use super::{path_id, payload};

pub(super) async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostAggregate>>, ServiceError> {
	Ok(Json(PostHandler::list(state.repository.as_ref()).await?))
}

pub(super) async fn create_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<PostAggregate>), ServiceError> {
	let command: WritePost = payload(body)?;
	let post = PostHandler::create(state.repository.as_ref(), &user, command).await?;
	Ok((StatusCode::CREATED, Json(post)))
}

pub(super) async fn retrieve_post(
	State(state): State<AppState>,
	id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PostAggregate>, ServiceError> {
	Ok(Json(PostHandler::retrieve(state.repository.as_ref(), path_id(id)?).await?))
}

pub(super) async fn update_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	id: Result<Path<i64>, PathRejection>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PostAggregate>, ServiceError> {
	let id = path_id(id)?;
	let command: WritePost = payload(body)?;
	Ok(Json(PostHandler::update(state.repository.as_ref(), &user, id, command).await?))
}

pub(super) async fn partial_update_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	id: Result<Path<i64>, PathRejection>,
	body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PostAggregate>, ServiceError> {
	let id = path_id(id)?;
	let command: PatchPost = payload(body)?;
	Ok(Json(PostHandler::partial_update(state.repository.as_ref(), &user, id, command).await?))
}

pub(super) async fn delete_post(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ServiceError> {
	PostHandler::delete(state.repository.as_ref(), &user, path_id(id)?).await?;
	Ok(StatusCode::NO_CONTENT)
}
