use axum::{
	async_trait,
	extract::{rejection::TypedHeaderRejectionReason, FromRequestParts},
	headers::{authorization::Bearer, Authorization},
	http::request::Parts,
	TypedHeader,
};

use crate::{dependencies::AppState, domain::post::entity::User, services::response::ServiceError};

/// The account behind the request's bearer token.
///
/// Extracting it is what makes a route require authentication: a missing
/// header, a token that fails verification, or a token for an unknown or
/// inactive account all reject the request with 401 before the body is read.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
	type Rejection = ServiceError;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let TypedHeader(Authorization(bearer)) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
			.await
			.map_err(|rejection| match rejection.reason() {
				TypedHeaderRejectionReason::Missing => ServiceError::NotAuthenticated,
				_ => ServiceError::InvalidToken,
			})?;

		let user_id = state.tokens.verify(bearer.token())?;

		match state.repository.find_user(user_id).await? {
			Some(user) if user.is_active => Ok(CurrentUser(user)),
			_ => {
				tracing::info!("Token presented for unknown or inactive user {}", user_id);
				Err(ServiceError::InvalidToken)
			}
		}
	}
}
