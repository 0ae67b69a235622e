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

//! Service configuration
//!
//! Configuration is environment-driven with sensible development defaults.
//! The JWT signing secret is the only required value; everything else
//! falls back to a local default.

use crate::error::{ApiError, Result};

/// Default bind address for the HTTP server
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Default SQLite database file
pub const DEFAULT_DATABASE_PATH: &str = "./bookrate.db";

/// Default access token lifetime in minutes
pub const DEFAULT_TOKEN_EXPIRE_MINUTES: i64 = 30;

/// Token signing configuration shared by issuance and validation
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for signing access tokens (HS256)
    pub secret: String,
    /// Access token lifetime in minutes
    pub token_expire_minutes: i64,
}

impl AuthConfig {
    pub fn new<S: Into<String>>(secret: S) -> Self {
        Self {
            secret: secret.into(),
            token_expire_minutes: DEFAULT_TOKEN_EXPIRE_MINUTES,
        }
    }

    /// Read auth configuration from environment variables
    ///
    /// `JWT_SECRET_KEY` is required. `TOKEN_EXPIRE_MINUTES` is optional and
    /// falls back to 30 minutes.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET_KEY")
            .map_err(|_| ApiError::internal("JWT_SECRET_KEY environment variable is not set"))?;

        let token_expire_minutes = std::env::var("TOKEN_EXPIRE_MINUTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_MINUTES);

        Ok(Self {
            secret,
            token_expire_minutes,
        })
    }
}
