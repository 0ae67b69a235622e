// Bookrate - Book Review Catalog Service
// Copyright (C) 2026 Bookrate contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Bearer token issuance and validation
//!
//! HS256 JWTs carrying the username as subject and an expiry. Anything that
//! fails validation (bad signature, expired, malformed) collapses into a
//! single unauthorized error; callers never learn which check failed.

use crate::config::AuthConfig;
use crate::error::{ApiError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims: subject (username) and expiry (unix seconds)
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Issue an access token for a username
pub fn create_access_token(auth: &AuthConfig, subject: &str) -> Result<String> {
    let expires_at = Utc::now() + Duration::minutes(auth.token_expire_minutes);
    let claims = Claims {
        sub: subject.to_string(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.secret.as_bytes()),
    )
    .map_err(|e| ApiError::internal(format!("Failed to encode token: {e}")))
}

/// Validate a token and return its subject
///
/// Checks signature and expiry; returns 401 on any failure.
pub fn decode_subject(auth: &AuthConfig, token: &str) -> Result<String> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| ApiError::unauthorized("Could not validate credentials"))?;

    Ok(data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let auth = AuthConfig::new("test-secret");
        let token = create_access_token(&auth, "john123").unwrap();
        let subject = decode_subject(&auth, &token).unwrap();
        assert_eq!(subject, "john123");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let auth = AuthConfig::new("test-secret");
        let other = AuthConfig::new("other-secret");
        let token = create_access_token(&auth, "john123").unwrap();

        let err = decode_subject(&other, &token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut auth = AuthConfig::new("test-secret");
        auth.token_expire_minutes = -5;
        let token = create_access_token(&auth, "john123").unwrap();

        let err = decode_subject(&auth, &token).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        let auth = AuthConfig::new("test-secret");
        let err = decode_subject(&auth, "not-a-token").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
