//! Access token format: an HS256 JWT whose `sub` carries the user id.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::services::response::ServiceError;

const ACCESS_TOKEN_TYPE: &str = "access";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
	/// User id, as a string
	pub sub: String,
	pub iat: i64,
	pub exp: i64,
	pub token_type: String,
}

#[derive(Clone)]
pub struct TokenKeys {
	encoding: Arc<EncodingKey>,
	decoding: Arc<DecodingKey>,
}

impl TokenKeys {
	pub fn from_secret(secret: &[u8]) -> Self {
		Self {
			encoding: Arc::new(EncodingKey::from_secret(secret)),
			decoding: Arc::new(DecodingKey::from_secret(secret)),
		}
	}

	/// Signs an access token for `user_id` that expires after `ttl`.
	pub fn issue(
		&self,
		user_id: i64,
		ttl: Duration,
	) -> Result<String, ServiceError> {
		let now = Utc::now();
		let claims = Claims {
			sub: user_id.to_string(),
			iat: now.timestamp(),
			exp: (now + ttl).timestamp(),
			token_type: ACCESS_TOKEN_TYPE.to_string(),
		};
		encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
			tracing::error!("Token signing failed: {:?}", err);
			ServiceError::ConfigError(err.to_string())
		})
	}

	/// Returns the user id the token was issued for.
	pub fn verify(
		&self,
		token: &str,
	) -> Result<i64, ServiceError> {
		let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256)).map_err(|err| {
			tracing::debug!("Rejected bearer token: {}", err);
			ServiceError::InvalidToken
		})?;

		if data.claims.token_type != ACCESS_TOKEN_TYPE {
			return Err(ServiceError::InvalidToken);
		}
		data.claims.sub.parse::<i64>().map_err(|_| ServiceError::InvalidToken)
	}
}

#[cfg(test)]
mod test {
	use chrono::Duration;

	use super::TokenKeys;
	use crate::services::response::ServiceError;

	#[test]
	fn test_issued_token_verifies_to_user_id() {
		let keys = TokenKeys::from_secret(b"test-secret");
		let token = keys.issue(7, Duration::minutes(5)).unwrap();

		assert_eq!(keys.verify(&token).unwrap(), 7);
	}

	#[test]
	fn test_expired_token_is_rejected() {
		let keys = TokenKeys::from_secret(b"test-secret");
		let token = keys.issue(7, Duration::hours(-1)).unwrap();

		assert!(matches!(keys.verify(&token), Err(ServiceError::InvalidToken)));
	}

	#[test]
	fn test_token_signed_with_other_secret_is_rejected() {
		let token = TokenKeys::from_secret(b"other-secret").issue(7, Duration::minutes(5)).unwrap();

		assert!(matches!(TokenKeys::from_secret(b"test-secret").verify(&token), Err(ServiceError::InvalidToken)));
		assert!(matches!(TokenKeys::from_secret(b"test-secret").verify("not-a-jwt"), Err(ServiceError::InvalidToken)));
	}
}
