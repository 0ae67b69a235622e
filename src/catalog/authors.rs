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

//! Author catalog operations
//!
//! Authors have no required fields; deleting one only detaches it from its
//! books (the junction rows cascade, the books stay).

use crate::error::{ApiError, Result};
use crate::storage::models::{Author, NewAuthor};
use crate::storage::queries;
use serde::Deserialize;
use sqlx::SqlitePool;

/// Request body for creating an author
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorCreate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub image_file: Option<String>,
}

/// Request body for a partial author update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub image_file: Option<String>,
}

/// Create an author
pub async fn create_author(pool: &SqlitePool, input: AuthorCreate) -> Result<Author> {
    let author_id = queries::insert_author(
        pool,
        &NewAuthor {
            first_name: input.first_name,
            last_name: input.last_name,
            middle_name: input.middle_name,
            image_file: input.image_file,
        },
    )
    .await?;

    get_author(pool, author_id).await
}

/// Fetch one author
pub async fn get_author(pool: &SqlitePool, author_id: i64) -> Result<Author> {
    queries::find_author_by_id(pool, author_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Author with id {author_id} is not found")))
}

/// List all authors
pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<Author>> {
    queries::list_authors(pool).await
}

/// Apply a partial update
pub async fn update_author(
    pool: &SqlitePool,
    author_id: i64,
    input: AuthorUpdate,
) -> Result<Author> {
    let mut author = get_author(pool, author_id).await?;

    if let Some(first_name) = input.first_name {
        author.first_name = Some(first_name);
    }
    if let Some(last_name) = input.last_name {
        author.last_name = Some(last_name);
    }
    if let Some(middle_name) = input.middle_name {
        author.middle_name = Some(middle_name);
    }
    if let Some(image_file) = input.image_file {
        author.image_file = Some(image_file);
    }

    queries::update_author(pool, &author).await?;
    Ok(author)
}

/// Delete an author, detaching it from its books
pub async fn delete_author(pool: &SqlitePool, author_id: i64) -> Result<()> {
    let deleted = queries::delete_author(pool, author_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found(format!(
            "Author with id {author_id} is not found"
        )));
    }
    tracing::info!(author_id, "author deleted");
    Ok(())
}
