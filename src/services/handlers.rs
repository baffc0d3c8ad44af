use validator::Validate;

use crate::{
	adapters::repositories::BlogRepository,
	domain::post::{
		commands::{PatchPost, WriteComment, WritePost},
		entity::{Comment, Post, PostChanges, PostLike, User},
		PostAggregate,
	},
};

use super::response::ServiceError;

pub struct PostHandler;
impl PostHandler {
	pub async fn list(repository: &dyn BlogRepository) -> Result<Vec<PostAggregate>, ServiceError> {
		repository.list_posts().await
	}

	/// The author is always the caller, whatever the body says.
	pub async fn create(
		repository: &dyn BlogRepository,
		caller: &User,
		command: WritePost,
	) -> Result<PostAggregate, ServiceError> {
		command.validate()?;
		let post = repository.insert_post(command.into_new_post(caller.id)).await?;
		tracing::info!("Post {} created by user {}", post.id, caller.id);
		Ok(post.into())
	}

	pub async fn retrieve(
		repository: &dyn BlogRepository,
		id: i64,
	) -> Result<PostAggregate, ServiceError> {
		repository.get_post(id).await?.ok_or(ServiceError::EntityNotFound)
	}

	/// Full update; any authenticated caller may edit any post.
	pub async fn update(
		repository: &dyn BlogRepository,
		caller: &User,
		id: i64,
		command: WritePost,
	) -> Result<PostAggregate, ServiceError> {
		command.validate()?;
		PostHandler::apply_changes(repository, caller, id, command.into()).await
	}

	pub async fn partial_update(
		repository: &dyn BlogRepository,
		caller: &User,
		id: i64,
		command: PatchPost,
	) -> Result<PostAggregate, ServiceError> {
		command.validate()?;
		PostHandler::apply_changes(repository, caller, id, command.into()).await
	}

	pub async fn delete(
		repository: &dyn BlogRepository,
		caller: &User,
		id: i64,
	) -> Result<(), ServiceError> {
		if !repository.delete_post(id).await? {
			return Err(ServiceError::EntityNotFound);
		}
		tracing::info!("Post {} deleted by user {}", id, caller.id);
		Ok(())
	}

	async fn apply_changes(
		repository: &dyn BlogRepository,
		caller: &User,
		id: i64,
		changes: PostChanges,
	) -> Result<PostAggregate, ServiceError> {
		let post: Post = repository.update_post(id, changes).await?.ok_or(ServiceError::EntityNotFound)?;
		tracing::info!("Post {} updated by user {}", post.id, caller.id);
		let comments = repository.list_comments(post.id).await?;
		Ok(PostAggregate::new(post, comments))
	}
}

pub struct CommentHandler;
impl CommentHandler {
	pub async fn list(
		repository: &dyn BlogRepository,
		post_id: i64,
	) -> Result<Vec<Comment>, ServiceError> {
		if !repository.post_exists(post_id).await? {
			return Err(ServiceError::EntityNotFound);
		}
		repository.list_comments(post_id).await
	}

	/// Author and post come from the caller and the path, never the body.
	pub async fn create(
		repository: &dyn BlogRepository,
		caller: &User,
		post_id: i64,
		command: WriteComment,
	) -> Result<Comment, ServiceError> {
		if !repository.post_exists(post_id).await? {
			return Err(ServiceError::EntityNotFound);
		}
		command.validate()?;
		let comment = repository
			.insert_comment(command.into_new_comment(post_id, caller.id))
			.await?
			.ok_or(ServiceError::EntityNotFound)?;
		tracing::info!("Comment {} on post {} created by user {}", comment.id, post_id, caller.id);
		Ok(comment)
	}
}

pub struct LikeHandler;
impl LikeHandler {
	pub async fn list(
		repository: &dyn BlogRepository,
		post_id: i64,
	) -> Result<Vec<PostLike>, ServiceError> {
		if !repository.post_exists(post_id).await? {
			return Err(ServiceError::EntityNotFound);
		}
		repository.list_likes(post_id).await
	}

	/// Repeated likes by the same user are all recorded.
	pub async fn create(
		repository: &dyn BlogRepository,
		caller: &User,
		post_id: i64,
	) -> Result<PostLike, ServiceError> {
		let like = repository.insert_like(post_id, caller.id).await?.ok_or(ServiceError::EntityNotFound)?;
		tracing::info!("Like {} on post {} created by user {}", like.id, post_id, caller.id);
		Ok(like)
	}
}
