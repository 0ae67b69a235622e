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

//! HTTP API
//!
//! Route handlers translate requests into `catalog` calls and shape the
//! responses; no business logic lives here. Resource groups: /books,
//! /authors, /reviews, /users.

use crate::config::AuthConfig;
use crate::storage::Database;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

pub mod authors;
pub mod books;
pub mod reviews;
pub mod users;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth: AuthConfig,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/books", books::routes())
        .nest("/authors", authors::routes())
        .nest("/reviews", reviews::routes())
        .nest("/users", users::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

/// Pagination query parameters shared by list endpoints
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Pagination {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}
