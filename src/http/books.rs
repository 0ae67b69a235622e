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

//! /books handlers

use crate::catalog::books::{self, BookCreate, BookDetails, BookUpdate};
use crate::error::Result;
use crate::http::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route(
            "/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/author/{author_id}", get(list_books_by_author))
}

async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookDetails>>> {
    Ok(Json(books::list_books(state.db.pool()).await?))
}

async fn get_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<Json<BookDetails>> {
    Ok(Json(books::get_book(state.db.pool(), book_id).await?))
}

async fn list_books_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<i64>,
) -> Result<Json<Vec<BookDetails>>> {
    Ok(Json(
        books::list_books_by_author(state.db.pool(), author_id).await?,
    ))
}

async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<BookCreate>,
) -> Result<(StatusCode, Json<BookDetails>)> {
    let details = books::create_book(state.db.pool(), input).await?;
    Ok((StatusCode::CREATED, Json(details)))
}

async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    Json(input): Json<BookUpdate>,
) -> Result<(StatusCode, Json<BookDetails>)> {
    let details = books::update_book(state.db.pool(), book_id, input).await?;
    Ok((StatusCode::ACCEPTED, Json(details)))
}

async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> Result<StatusCode> {
    books::delete_book(state.db.pool(), book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
