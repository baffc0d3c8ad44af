use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
	pub id: i64,
	pub title: String,
	pub content: String,
	#[serde(rename = "author")]
	pub author_id: i64,
	pub published_date: DateTime<Utc>,
}

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
	pub id: i64,
	#[serde(rename = "author")]
	pub author_id: i64,
	pub text: String,
	pub created_date: DateTime<Utc>,
	#[serde(rename = "post")]
	pub post_id: i64,
}

#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostLike {
	pub id: i64,
	#[serde(rename = "created_by")]
	pub created_by_id: i64,
	pub create_date: DateTime<Utc>,
	#[serde(rename = "post")]
	pub post_id: i64,
}

/// Account a post, comment or like is attributed to.
#[derive(Clone, PartialEq, Eq, Debug, sqlx::FromRow)]
pub struct User {
	pub id: i64,
	pub username: String,
	pub is_active: bool,
}

pub struct NewPost {
	pub title: String,
	pub content: String,
	pub author_id: i64,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Default)]
pub struct PostChanges {
	pub title: Option<String>,
	pub content: Option<String>,
}

pub struct NewComment {
	pub post_id: i64,
	pub author_id: i64,
	pub text: String,
}
