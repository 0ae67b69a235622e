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

//! /users handlers
//!
//! Registration and login are public; /users/me requires a bearer token.
//! Login takes form fields (OAuth2 password flow style), everything else
//! is JSON.

use crate::auth::CurrentUser;
use crate::catalog::users::{self, LoginForm, TokenResponse, UserCreate, UserProfile, UserUpdate};
use crate::error::Result;
use crate::http::{AppState, Pagination};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Form, Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/registration", post(register))
        .route("/login", post(login))
        .route("/me", get(me).put(update_me).delete(delete_me))
}

async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<UserProfile>>> {
    Ok(Json(
        users::list_users(state.db.pool(), page.offset, page.limit).await?,
    ))
}

async fn register(
    State(state): State<AppState>,
    Json(input): Json<UserCreate>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let profile = users::register(state.db.pool(), input).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<(StatusCode, Json<TokenResponse>)> {
    let token = users::login(state.db.pool(), &state.auth, form).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

async fn me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserProfile>> {
    Ok(Json(users::current_profile(state.db.pool(), user).await?))
}

async fn update_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<UserUpdate>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let profile = users::update_current(state.db.pool(), &user, input).await?;
    Ok((StatusCode::ACCEPTED, Json(profile)))
}

async fn delete_me(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode> {
    users::delete_current(state.db.pool(), &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
