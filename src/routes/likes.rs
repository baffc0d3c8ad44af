use axum::{
	extract::{rejection::PathRejection, Path, State},
	http::StatusCode,
	Json,
};

use crate::{
	common::auth::CurrentUser,
	dependencies::AppState,
	domain::post::entity::PostLike,
	services::{handlers::LikeHandler, response::ServiceError},
};

use super::path_id;

pub(super) async fn list_likes(
	State(state): State<AppState>,
	post_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<PostLike>>, ServiceError> {
	Ok(Json(LikeHandler::list(state.repository.as_ref(), path_id(post_id)?).await?))
}

// takes no body: a like has no client-writable fields
pub(super) async fn create_like(
	State(state): State<AppState>,
	CurrentUser(user): CurrentUser,
	post_id: Result<Path<i64>, PathRejection>,
) -> Result<(StatusCode, Json<PostLike>), ServiceError> {
	let like = LikeHandler::create(state.repository.as_ref(), &user, path_id(post_id)?).await?;
	Ok((StatusCode::CREATED, Json(like)))
}
