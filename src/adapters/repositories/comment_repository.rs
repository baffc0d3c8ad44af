use async_trait::async_trait;

use crate::{
	domain::post::entity::{Comment, NewComment},
	services::response::ServiceError,
};

use super::{is_foreign_key_violation, CommentRepository, Repository};

#[async_trait]
impl CommentRepository for Repository {
	async fn list_comments(
		&self,
		post_id: i64,
	) -> Result<Vec<Comment>, ServiceError> {
		let comments = sqlx::query_as::<_, Comment>("SELECT id, author_id, text, created_date, post_id FROM comments WHERE post_id = $1 ORDER BY id")
			.bind(post_id)
			.fetch_all(&self.pool)
			.await?;
		Ok(comments)
	}

	async fn insert_comment(
		&self,
		new_comment: NewComment,
	) -> Result<Option<Comment>, ServiceError> {
		let inserted = sqlx::query_as::<_, Comment>(
			"INSERT INTO comments (post_id, author_id, text)
			SELECT $1, $2, $3 WHERE EXISTS (SELECT 1 FROM posts WHERE id = $1)
			RETURNING id, author_id, text, created_date, post_id",
		)
		.bind(new_comment.post_id)
		.bind(new_comment.author_id)
		.bind(new_comment.text)
		.fetch_optional(&self.pool)
		.await;

		match inserted {
			Ok(comment) => Ok(comment),
			// post removed between the existence check and the insert
			Err(err) if is_foreign_key_violation(&err) => Ok(None),
			Err(err) => Err(err.into()),
		}
	}
}
