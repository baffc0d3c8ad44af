pub(crate) mod comment_repository;
pub(crate) mod like_repository;
pub mod memory;
pub(crate) mod post_repository;
pub(crate) mod user_repository;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::post::{
	entity::{Comment, NewComment, NewPost, Post, PostChanges, PostLike, User},
	PostAggregate,
};
use crate::services::response::ServiceError;

pub use memory::MemoryRepository;

#[async_trait]
pub trait PostRepository: Send + Sync {
	/// All posts in id order, each with its comments.
	async fn list_posts(&self) -> Result<Vec<PostAggregate>, ServiceError>;
	async fn get_post(
		&self,
		id: i64,
	) -> Result<Option<PostAggregate>, ServiceError>;
	async fn post_exists(
		&self,
		id: i64,
	) -> Result<bool, ServiceError>;
	async fn insert_post(
		&self,
		new_post: NewPost,
	) -> Result<Post, ServiceError>;
	async fn update_post(
		&self,
		id: i64,
		changes: PostChanges,
	) -> Result<Option<Post>, ServiceError>;
	/// Removes the post together with its comments and likes.
	async fn delete_post(
		&self,
		id: i64,
	) -> Result<bool, ServiceError>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
	async fn list_comments(
		&self,
		post_id: i64,
	) -> Result<Vec<Comment>, ServiceError>;
	/// Returns `None` when the referenced post does not exist.
	async fn insert_comment(
		&self,
		new_comment: NewComment,
	) -> Result<Option<Comment>, ServiceError>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
	async fn list_likes(
		&self,
		post_id: i64,
	) -> Result<Vec<PostLike>, ServiceError>;
	/// Returns `None` when the referenced post does not exist.
	async fn insert_like(
		&self,
		post_id: i64,
		created_by_id: i64,
	) -> Result<Option<PostLike>, ServiceError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
	async fn find_user(
		&self,
		id: i64,
	) -> Result<Option<User>, ServiceError>;
}

pub trait BlogRepository: PostRepository + CommentRepository + LikeRepository + UserRepository {}
impl<T: PostRepository + CommentRepository + LikeRepository + UserRepository> BlogRepository for T {}

/// Postgres-backed storage; every method runs as a single statement
/// (or read-only statements) against the pool.
#[derive(Clone)]
pub struct Repository {
	pub(crate) pool: PgPool,
}

impl Repository {
	pub fn new(pool: PgPool) -> Self {
		Self { pool }
	}
}

/// Postgres SQLSTATE for `foreign_key_violation`.
pub(crate) const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
	match err {
		sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION),
		_ => false,
	}
}
