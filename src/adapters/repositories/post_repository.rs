use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
	domain::post::{
		entity::{Comment, NewPost, Post, PostChanges},
		PostAggregate,
	},
	services::response::ServiceError,
};

use super::{PostRepository, Repository};

const POST_COLUMNS: &str = "id, title, content, author_id, published_date";
const COMMENT_COLUMNS: &str = "id, author_id, text, created_date, post_id";

impl Repository {
	async fn comments_by_post(
		&self,
		post_ids: &[i64],
	) -> Result<HashMap<i64, Vec<Comment>>, ServiceError> {
		let comments = sqlx::query_as::<_, Comment>(&format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ANY($1) ORDER BY id"))
			.bind(post_ids)
			.fetch_all(&self.pool)
			.await?;

		let mut grouped: HashMap<i64, Vec<Comment>> = HashMap::new();
		for comment in comments {
			grouped.entry(comment.post_id).or_default().push(comment);
		}
		Ok(grouped)
	}
}

#[async_trait]
impl PostRepository for Repository {
	async fn list_posts(&self) -> Result<Vec<PostAggregate>, ServiceError> {
		let posts = sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts ORDER BY id"))
			.fetch_all(&self.pool)
			.await?;

		let ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
		let mut comments = self.comments_by_post(&ids).await?;

		Ok(posts
			.into_iter()
			.map(|post| {
				let post_comments = comments.remove(&post.id).unwrap_or_default();
				PostAggregate::new(post, post_comments)
			})
			.collect())
	}

	async fn get_post(
		&self,
		id: i64,
	) -> Result<Option<PostAggregate>, ServiceError> {
		let Some(post) = sqlx::query_as::<_, Post>(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
			.bind(id)
			.fetch_optional(&self.pool)
			.await?
		else {
			return Ok(None);
		};

		let comments = self.comments_by_post(&[id]).await?.remove(&id).unwrap_or_default();
		Ok(Some(PostAggregate::new(post, comments)))
	}

	async fn post_exists(
		&self,
		id: i64,
	) -> Result<bool, ServiceError> {
		let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
			.bind(id)
			.fetch_one(&self.pool)
			.await?;
		Ok(exists)
	}

	async fn insert_post(
		&self,
		new_post: NewPost,
	) -> Result<Post, ServiceError> {
		let post = sqlx::query_as::<_, Post>(&format!(
			"INSERT INTO posts (title, content, author_id) VALUES ($1, $2, $3) RETURNING {POST_COLUMNS}"
		))
		.bind(new_post.title)
		.bind(new_post.content)
		.bind(new_post.author_id)
		.fetch_one(&self.pool)
		.await?;
		Ok(post)
	}

	async fn update_post(
		&self,
		id: i64,
		changes: PostChanges,
	) -> Result<Option<Post>, ServiceError> {
		let post = sqlx::query_as::<_, Post>(&format!(
			"UPDATE posts SET title = COALESCE($2, title), content = COALESCE($3, content) WHERE id = $1 RETURNING {POST_COLUMNS}"
		))
		.bind(id)
		.bind(changes.title)
		.bind(changes.content)
		.fetch_optional(&self.pool)
		.await?;
		Ok(post)
	}

	async fn delete_post(
		&self,
		id: i64,
	) -> Result<bool, ServiceError> {
		// comments and likes go with the post through ON DELETE CASCADE
		let result = sqlx::query("DELETE FROM posts WHERE id = $1").bind(id).execute(&self.pool).await?;
		Ok(result.rows_affected() > 0)
	}
}
