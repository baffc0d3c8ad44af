//! Request bodies accepted by the write endpoints.
//!
//! Every field is optional at the serde level so that a missing field is
//! reported by validation as a field error instead of failing the whole
//! body. Read-only fields such as `author`, `post` or `created_by` are not
//! declared here and are therefore ignored when a client sends them.
//! Text is stored with surrounding whitespace trimmed.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use super::entity::{NewComment, NewPost, PostChanges};

fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(Option::<String>::deserialize(deserializer)?.map(|value| value.trim().to_string()))
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		let mut error = ValidationError::new("blank");
		error.message = Some(Cow::Borrowed("This field may not be blank."));
		return Err(error);
	}
	Ok(())
}

/// Body of `POST /posts` and `PUT /posts/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct WritePost {
	#[serde(default, deserialize_with = "trimmed")]
	#[validate(required(message = "This field is required."), custom(function = "not_blank"), length(max = 200, message = "Ensure this field has no more than 200 characters."))]
	pub title: Option<String>,
	#[serde(default, deserialize_with = "trimmed")]
	#[validate(required(message = "This field is required."), custom(function = "not_blank"))]
	pub content: Option<String>,
}

impl WritePost {
	pub fn into_new_post(
		self,
		author_id: i64,
	) -> NewPost {
		NewPost {
			title: self.title.unwrap_or_default(),
			content: self.content.unwrap_or_default(),
			author_id,
		}
	}
}

impl From<WritePost> for PostChanges {
	fn from(value: WritePost) -> Self {
		PostChanges {
			title: value.title,
			content: value.content,
		}
	}
}

/// Body of `PATCH /posts/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PatchPost {
	#[serde(default, deserialize_with = "trimmed")]
	#[validate(custom(function = "not_blank"), length(max = 200, message = "Ensure this field has no more than 200 characters."))]
	pub title: Option<String>,
	#[serde(default, deserialize_with = "trimmed")]
	#[validate(custom(function = "not_blank"))]
	pub content: Option<String>,
}

impl From<PatchPost> for PostChanges {
	fn from(value: PatchPost) -> Self {
		PostChanges {
			title: value.title,
			content: value.content,
		}
	}
}

/// Body of `POST /posts/{post_id}/comments`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct WriteComment {
	#[serde(default, deserialize_with = "trimmed")]
	#[validate(required(message = "This field is required."), custom(function = "not_blank"))]
	pub text: Option<String>,
}

impl WriteComment {
	pub fn into_new_comment(
		self,
		post_id: i64,
		author_id: i64,
	) -> NewComment {
		NewComment {
			post_id,
			author_id,
			text: self.text.unwrap_or_default(),
		}
	}
}
