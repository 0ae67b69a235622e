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

//! /authors handlers

use crate::catalog::authors::{self, AuthorCreate, AuthorUpdate};
use crate::error::Result;
use crate::http::AppState;
use crate::storage::models::Author;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_authors).post(create_author))
        .route(
            "/{author_id}",
            get(get_author).put(update_author).delete(delete_author),
        )
}

async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<Author>>> {
    Ok(Json(authors::list_authors(state.db.pool()).await?))
}

async fn get_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> Result<Json<Author>> {
    Ok(Json(authors::get_author(state.db.pool(), author_id).await?))
}

async fn create_author(
    State(state): State<AppState>,
    Json(input): Json<AuthorCreate>,
) -> Result<(StatusCode, Json<Author>)> {
    let author = authors::create_author(state.db.pool(), input).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

async fn update_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
    Json(input): Json<AuthorUpdate>,
) -> Result<(StatusCode, Json<Author>)> {
    let author = authors::update_author(state.db.pool(), author_id, input).await?;
    Ok((StatusCode::ACCEPTED, Json(author)))
}

async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> Result<StatusCode> {
    authors::delete_author(state.db.pool(), author_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
