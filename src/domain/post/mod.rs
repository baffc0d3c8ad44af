use std::ops::{Deref, DerefMut};

use serde::Serialize;

use self::entity::{Comment, Post};
pub mod commands;
pub mod entity;

/// A post as it is read back by clients: the record plus its comments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostAggregate {
	#[serde(flatten)]
	pub(crate) post: Post,
	pub(crate) comments: Vec<Comment>,
}

impl PostAggregate {
	pub fn new(
		post: Post,
		comments: Vec<Comment>,
	) -> Self {
		Self { post, comments }
	}

	pub fn comments(&self) -> &[Comment] {
		&self.comments
	}
}

impl From<Post> for PostAggregate {
	fn from(value: Post) -> Self {
		Self::new(value, Vec::new())
	}
}

impl Deref for PostAggregate {
	type Target = Post;
	fn deref(&self) -> &Self::Target {
		&self.post
	}
}
impl DerefMut for PostAggregate {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.post
	}
}
