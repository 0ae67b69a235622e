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

//! User account operations
//!
//! Registration, login, profile reads and self-service updates. Username
//! and email are unique (406 on duplicates); usernames must be alphanumeric
//! and password changes must carry a matching confirmation (422). Deleting
//! an account cascades its reviews, so the affected books get their ratings
//! recomputed here.

use crate::auth::{password, token};
use crate::catalog::rating;
use crate::config::AuthConfig;
use crate::error::{ApiError, Result};
use crate::storage::models::{NewUser, Review, User, UserRank};
use crate::storage::queries;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Default page size for user listings
pub const DEFAULT_USER_LIMIT: i64 = 10;

/// Request body for registration
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Request body for updating the current user; all fields optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Login form fields (submitted as a form, not JSON)
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Bearer token response for a successful login
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// User read shape: account fields, derived rank, and the user's reviews
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub rank: UserRank,
    pub created_at: NaiveDateTime,
    pub reviews: Vec<Review>,
}

fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || !username.chars().all(char::is_alphanumeric) {
        return Err(ApiError::validation("must be alphanumeric".to_string()));
    }
    Ok(())
}

fn validate_passwords_match(password: &str, confirm_password: &str) -> Result<()> {
    if password != confirm_password {
        return Err(ApiError::validation("passwords do not match".to_string()));
    }
    Ok(())
}

async fn ensure_username_free(pool: &SqlitePool, username: &str) -> Result<()> {
    if queries::find_user_by_username(pool, username).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "User with username '{username}' is already exist"
        )));
    }
    Ok(())
}

async fn ensure_email_free(pool: &SqlitePool, email: &str) -> Result<()> {
    if queries::find_user_by_email(pool, email).await?.is_some() {
        return Err(ApiError::conflict(format!(
            "User with email '{email}' is already exist"
        )));
    }
    Ok(())
}

async fn load_profile(pool: &SqlitePool, user: User) -> Result<UserProfile> {
    let reviews = queries::list_reviews_by_user(pool, user.id).await?;
    Ok(UserProfile {
        id: user.id,
        username: user.username,
        email: user.email,
        rank: user.rank,
        created_at: user.created_at,
        reviews,
    })
}

/// Register a new user
pub async fn register(pool: &SqlitePool, input: UserCreate) -> Result<UserProfile> {
    validate_username(&input.username)?;
    validate_passwords_match(&input.password, &input.confirm_password)?;
    ensure_username_free(pool, &input.username).await?;
    ensure_email_free(pool, &input.email).await?;

    let password_hash = password::hash_password(&input.password)?;
    let user_id = queries::insert_user(
        pool,
        &NewUser {
            username: input.username,
            email: input.email,
            password_hash,
        },
    )
    .await?;

    let user = queries::find_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ApiError::internal("user vanished after insert"))?;

    tracing::info!(user_id, "user registered");
    load_profile(pool, user).await
}

/// Verify credentials and issue a bearer token
pub async fn login(pool: &SqlitePool, auth: &AuthConfig, form: LoginForm) -> Result<TokenResponse> {
    let user = queries::find_user_by_username(pool, &form.username)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "User with username '{}' is not exist",
                form.username
            ))
        })?;

    if !password::verify_password(&form.password, &user.password_hash)? {
        return Err(ApiError::BadRequest("Incorrect password".to_string()));
    }

    let access_token = token::create_access_token(auth, &user.username)?;
    tracing::info!(user_id = user.id, "user logged in");

    Ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// List users with pagination
pub async fn list_users(
    pool: &SqlitePool,
    offset: Option<i64>,
    limit: Option<i64>,
) -> Result<Vec<UserProfile>> {
    let offset = offset.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(DEFAULT_USER_LIMIT).max(0);

    let users = queries::list_users(pool, offset, limit).await?;
    let mut profiles = Vec::with_capacity(users.len());
    for user in users {
        profiles.push(load_profile(pool, user).await?);
    }
    Ok(profiles)
}

/// Profile of the authenticated user
pub async fn current_profile(pool: &SqlitePool, user: User) -> Result<UserProfile> {
    load_profile(pool, user).await
}

/// Update the authenticated user
///
/// A password change is applied only when both `password` and
/// `confirm_password` are present and match.
pub async fn update_current(pool: &SqlitePool, user: &User, input: UserUpdate) -> Result<UserProfile> {
    let mut updated = user.clone();

    if let Some(username) = input.username {
        validate_username(&username)?;
        if username != user.username {
            ensure_username_free(pool, &username).await?;
        }
        updated.username = username;
    }
    if let Some(email) = input.email {
        if email != user.email {
            ensure_email_free(pool, &email).await?;
        }
        updated.email = email;
    }
    if input.password.is_some() || input.confirm_password.is_some() {
        let password = input.password.as_deref().unwrap_or("");
        let confirm = input.confirm_password.as_deref().unwrap_or("");
        validate_passwords_match(password, confirm)?;
        updated.password_hash = password::hash_password(password)?;
    }

    queries::update_user(pool, &updated).await?;
    load_profile(pool, updated).await
}

/// Delete the authenticated user
///
/// Reviews cascade with the account, so every book the user reviewed gets
/// its rating recomputed afterwards.
pub async fn delete_current(pool: &SqlitePool, user: &User) -> Result<()> {
    let reviewed_books = queries::book_ids_reviewed_by_user(pool, user.id).await?;

    queries::delete_user(pool, user.id).await?;

    for book_id in reviewed_books {
        rating::refresh_book_rating(pool, book_id).await?;
    }

    tracing::info!(user_id = user.id, "user deleted");
    Ok(())
}
