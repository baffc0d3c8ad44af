use async_trait::async_trait;

use crate::{domain::post::entity::PostLike, services::response::ServiceError};

use super::{is_foreign_key_violation, LikeRepository, Repository};

#[async_trait]
impl LikeRepository for Repository {
	async fn list_likes(
		&self,
		post_id: i64,
	) -> Result<Vec<PostLike>, ServiceError> {
		let likes = sqlx::query_as::<_, PostLike>("SELECT id, created_by_id, create_date, post_id FROM likes WHERE post_id = $1 ORDER BY id")
			.bind(post_id)
			.fetch_all(&self.pool)
			.await?;
		Ok(likes)
	}

	async fn insert_like(
		&self,
		post_id: i64,
		created_by_id: i64,
	) -> Result<Option<PostLike>, ServiceError> {
		let inserted = sqlx::query_as::<_, PostLike>(
			"INSERT INTO likes (post_id, created_by_id)
			SELECT $1, $2 WHERE EXISTS (SELECT 1 FROM posts WHERE id = $1)
			RETURNING id, created_by_id, create_date, post_id",
		)
		.bind(post_id)
		.bind(created_by_id)
		.fetch_optional(&self.pool)
		.await;

		match inserted {
			Ok(like) => Ok(like),
			Err(err) if is_foreign_key_violation(&err) => Ok(None),
			Err(err) => Err(err.into()),
		}
	}
}
