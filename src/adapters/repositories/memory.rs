//! In-process storage with the same observable behaviour as the Postgres
//! repository: ascending ids, server-side timestamps and cascading deletes.

use std::{
	collections::{BTreeMap, HashMap},
	sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
	domain::post::{
		entity::{Comment, NewComment, NewPost, Post, PostChanges, PostLike, User},
		PostAggregate,
	},
	services::response::ServiceError,
};

use super::{CommentRepository, LikeRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
	users: HashMap<i64, User>,
	posts: BTreeMap<i64, Post>,
	comments: BTreeMap<i64, Comment>,
	likes: BTreeMap<i64, PostLike>,
	last_user_id: i64,
	last_post_id: i64,
	last_comment_id: i64,
	last_like_id: i64,
}

impl Tables {
	fn comments_of(
		&self,
		post_id: i64,
	) -> Vec<Comment> {
		self.comments.values().filter(|comment| comment.post_id == post_id).cloned().collect()
	}
}

#[derive(Clone, Default)]
pub struct MemoryRepository {
	tables: Arc<RwLock<Tables>>,
}

impl MemoryRepository {
	pub fn new() -> Self {
		Self::default()
	}

	pub async fn add_user(
		&self,
		username: &str,
		is_active: bool,
	) -> User {
		let mut tables = self.tables.write().await;
		tables.last_user_id += 1;
		let user = User {
			id: tables.last_user_id,
			username: username.to_string(),
			is_active,
		};
		tables.users.insert(user.id, user.clone());
		user
	}

	pub async fn post_count(&self) -> usize {
		self.tables.read().await.posts.len()
	}

	pub async fn comment_count(&self) -> usize {
		self.tables.read().await.comments.len()
	}

	pub async fn like_count(&self) -> usize {
		self.tables.read().await.likes.len()
	}
}

#[async_trait]
impl PostRepository for MemoryRepository {
	async fn list_posts(&self) -> Result<Vec<PostAggregate>, ServiceError> {
		let tables = self.tables.read().await;
		Ok(tables
			.posts
			.values()
			.map(|post| PostAggregate::new(post.clone(), tables.comments_of(post.id)))
			.collect())
	}

	async fn get_post(
		&self,
		id: i64,
	) -> Result<Option<PostAggregate>, ServiceError> {
		let tables = self.tables.read().await;
		Ok(tables.posts.get(&id).map(|post| PostAggregate::new(post.clone(), tables.comments_of(id))))
	}

	async fn post_exists(
		&self,
		id: i64,
	) -> Result<bool, ServiceError> {
		Ok(self.tables.read().await.posts.contains_key(&id))
	}

	async fn insert_post(
		&self,
		new_post: NewPost,
	) -> Result<Post, ServiceError> {
		let mut tables = self.tables.write().await;
		tables.last_post_id += 1;
		let post = Post {
			id: tables.last_post_id,
			title: new_post.title,
			content: new_post.content,
			author_id: new_post.author_id,
			published_date: Utc::now(),
		};
		tables.posts.insert(post.id, post.clone());
		Ok(post)
	}

	async fn update_post(
		&self,
		id: i64,
		changes: PostChanges,
	) -> Result<Option<Post>, ServiceError> {
		let mut tables = self.tables.write().await;
		let Some(post) = tables.posts.get_mut(&id) else {
			return Ok(None);
		};
		if let Some(title) = changes.title {
			post.title = title;
		}
		if let Some(content) = changes.content {
			post.content = content;
		}
		Ok(Some(post.clone()))
	}

	async fn delete_post(
		&self,
		id: i64,
	) -> Result<bool, ServiceError> {
		let mut tables = self.tables.write().await;
		if tables.posts.remove(&id).is_none() {
			return Ok(false);
		}
		tables.comments.retain(|_, comment| comment.post_id != id);
		tables.likes.retain(|_, like| like.post_id != id);
		Ok(true)
	}
}

#[async_trait]
impl CommentRepository for MemoryRepository {
	async fn list_comments(
		&self,
		post_id: i64,
	) -> Result<Vec<Comment>, ServiceError> {
		Ok(self.tables.read().await.comments_of(post_id))
	}

	async fn insert_comment(
		&self,
		new_comment: NewComment,
	) -> Result<Option<Comment>, ServiceError> {
		let mut tables = self.tables.write().await;
		if !tables.posts.contains_key(&new_comment.post_id) {
			return Ok(None);
		}
		tables.last_comment_id += 1;
		let comment = Comment {
			id: tables.last_comment_id,
			author_id: new_comment.author_id,
			text: new_comment.text,
			created_date: Utc::now(),
			post_id: new_comment.post_id,
		};
		tables.comments.insert(comment.id, comment.clone());
		Ok(Some(comment))
	}
}

#[async_trait]
impl LikeRepository for MemoryRepository {
	async fn list_likes(
		&self,
		post_id: i64,
	) -> Result<Vec<PostLike>, ServiceError> {
		Ok(self.tables.read().await.likes.values().filter(|like| like.post_id == post_id).cloned().collect())
	}

	async fn insert_like(
		&self,
		post_id: i64,
		created_by_id: i64,
	) -> Result<Option<PostLike>, ServiceError> {
		let mut tables = self.tables.write().await;
		if !tables.posts.contains_key(&post_id) {
			return Ok(None);
		}
		tables.last_like_id += 1;
		let like = PostLike {
			id: tables.last_like_id,
			created_by_id,
			create_date: Utc::now(),
			post_id,
		};
		tables.likes.insert(like.id, like.clone());
		Ok(Some(like))
	}
}

#[async_trait]
impl UserRepository for MemoryRepository {
	async fn find_user(
		&self,
		id: i64,
	) -> Result<Option<User>, ServiceError> {
		Ok(self.tables.read().await.users.get(&id).cloned())
	}
}

#[cfg(test)]
mod test {
	use super::MemoryRepository;
	use crate::adapters::repositories::{CommentRepository, LikeRepository, PostRepository};
	use crate::domain::post::entity::{NewComment, NewPost};

	#[tokio::test]
	async fn test_delete_post_cascades_to_comments_and_likes() {
		'_given: {
			let repository = MemoryRepository::new();
			let user = repository.add_user("testuser", true).await;
			let kept = repository
				.insert_post(NewPost {
					title: "Kept".into(),
					content: "Kept Content".into(),
					author_id: user.id,
				})
				.await
				.unwrap();
			let removed = repository
				.insert_post(NewPost {
					title: "Removed".into(),
					content: "Removed Content".into(),
					author_id: user.id,
				})
				.await
				.unwrap();
			for post_id in [kept.id, removed.id] {
				repository
					.insert_comment(NewComment {
						post_id,
						author_id: user.id,
						text: "Test Comment".into(),
					})
					.await
					.unwrap();
				repository.insert_like(post_id, user.id).await.unwrap();
			}

			'_when: {
				assert!(repository.delete_post(removed.id).await.unwrap());

				'_then: {
					assert_eq!(repository.post_count().await, 1);
					assert_eq!(repository.comment_count().await, 1);
					assert_eq!(repository.like_count().await, 1);
					assert!(repository.list_comments(removed.id).await.unwrap().is_empty());
					assert_eq!(repository.list_likes(kept.id).await.unwrap().len(), 1);
				}
			}
		}
	}

	#[tokio::test]
	async fn test_insert_on_missing_post_returns_none() {
		let repository = MemoryRepository::new();
		let user = repository.add_user("testuser", true).await;

		let comment = repository
			.insert_comment(NewComment {
				post_id: 42,
				author_id: user.id,
				text: "Orphan".into(),
			})
			.await
			.unwrap();
		assert!(comment.is_none());
		assert!(repository.insert_like(42, user.id).await.unwrap().is_none());
		assert_eq!(repository.comment_count().await, 0);
	}
}
