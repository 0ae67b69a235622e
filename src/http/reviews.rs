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

//! /reviews handlers
//!
//! Reads are public; every mutation requires a bearer token and, for
//! update/delete, ownership of the review.

use crate::auth::CurrentUser;
use crate::catalog::reviews::{self, ReviewCreate, ReviewUpdate};
use crate::error::Result;
use crate::http::{AppState, Pagination};
use crate::storage::models::Review;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{review_id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

async fn list_reviews(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<Review>>> {
    Ok(Json(
        reviews::list_reviews(state.db.pool(), page.offset, page.limit).await?,
    ))
}

async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<i64>,
) -> Result<Json<Review>> {
    Ok(Json(reviews::get_review(state.db.pool(), review_id).await?))
}

async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<ReviewCreate>,
) -> Result<(StatusCode, Json<Review>)> {
    let review = reviews::create_review(state.db.pool(), &user, input).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn update_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i64>,
    Json(input): Json<ReviewUpdate>,
) -> Result<(StatusCode, Json<Review>)> {
    let review = reviews::update_review(state.db.pool(), &user, review_id, input).await?;
    Ok((StatusCode::ACCEPTED, Json(review)))
}

async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<i64>,
) -> Result<StatusCode> {
    reviews::delete_review(state.db.pool(), &user, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
