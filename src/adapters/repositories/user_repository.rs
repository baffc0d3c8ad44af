use async_trait::async_trait;

use crate::{domain::post::entity::User, services::response::ServiceError};

use super::{Repository, UserRepository};

#[async_trait]
impl UserRepository for Repository {
	async fn find_user(
		&self,
		id: i64,
	) -> Result<Option<User>, ServiceError> {
		let user = sqlx::query_as::<_, User>("SELECT id, username, is_active FROM users WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;
		Ok(user)
	}
}
