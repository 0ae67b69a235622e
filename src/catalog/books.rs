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

//! Book catalog operations
//!
//! Create/read/update/delete for books, including the author links carried
//! in the request body. Input bounds (publication year, page count) are
//! checked before anything is persisted.

use crate::catalog::authors;
use crate::error::{ApiError, Result};
use crate::storage::models::{Book, BookFormat, Genre, NewBook};
use crate::storage::queries;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Earliest accepted publication year (movable type printing)
const MIN_YEAR: i32 = 1450;
/// Latest accepted publication year
const MAX_YEAR: i32 = 2022;
/// Smallest accepted page count
const MIN_PAGES: i32 = 15;

/// Request body for creating a book
#[derive(Debug, Clone, Deserialize)]
pub struct BookCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub image_file: Option<String>,
    pub pages: i32,
    pub genre: Genre,
    pub format: BookFormat,
    #[serde(default)]
    pub author_ids: Vec<i64>,
}

/// Request body for a partial book update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub image_file: Option<String>,
    pub pages: Option<i32>,
    pub genre: Option<Genre>,
    pub format: Option<BookFormat>,
    pub author_ids: Option<Vec<i64>>,
}

/// Book with its authors and reviews embedded, the read shape of the API
#[derive(Debug, Clone, Serialize)]
pub struct BookDetails {
    #[serde(flatten)]
    pub book: Book,
    pub authors: Vec<crate::storage::models::Author>,
    pub reviews: Vec<crate::storage::models::Review>,
}

fn validate_year(year: i32) -> Result<()> {
    if year > MAX_YEAR {
        return Err(ApiError::validation(format!(
            "The year cannot be greater than {MAX_YEAR}"
        )));
    }
    if year < MIN_YEAR {
        return Err(ApiError::validation(format!(
            "The year cannot be lower than {MIN_YEAR}"
        )));
    }
    Ok(())
}

fn validate_pages(pages: i32) -> Result<()> {
    if pages < MIN_PAGES {
        return Err(ApiError::validation(format!(
            "There cannot be less than {MIN_PAGES} pages"
        )));
    }
    Ok(())
}

/// Verify that every id in the list names an existing author
async fn ensure_authors_exist(pool: &SqlitePool, ids: &[i64]) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = queries::count_existing_authors(pool, ids).await?;
    if found != ids.len() as i64 {
        return Err(ApiError::not_found("Authors is not found"));
    }
    Ok(())
}

async fn load_details(pool: &SqlitePool, book: Book) -> Result<BookDetails> {
    let authors = queries::find_authors_by_book(pool, book.id).await?;
    let reviews = queries::list_reviews_by_book(pool, book.id).await?;
    Ok(BookDetails {
        book,
        authors,
        reviews,
    })
}

/// Fetch one book with authors and reviews
pub async fn get_book(pool: &SqlitePool, book_id: i64) -> Result<BookDetails> {
    let book = queries::find_book_by_id(pool, book_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Book with id {book_id} is not found")))?;
    load_details(pool, book).await
}

/// List the whole catalog
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<BookDetails>> {
    let books = queries::list_books(pool).await?;
    let mut details = Vec::with_capacity(books.len());
    for book in books {
        details.push(load_details(pool, book).await?);
    }
    Ok(details)
}

/// List the books linked to one author
pub async fn list_books_by_author(pool: &SqlitePool, author_id: i64) -> Result<Vec<BookDetails>> {
    // 404 for an unknown author rather than an empty list
    authors::get_author(pool, author_id).await?;

    let books = queries::list_books_by_author(pool, author_id).await?;
    let mut details = Vec::with_capacity(books.len());
    for book in books {
        details.push(load_details(pool, book).await?);
    }
    Ok(details)
}

/// Create a book and link its authors
pub async fn create_book(pool: &SqlitePool, input: BookCreate) -> Result<BookDetails> {
    validate_year(input.year)?;
    validate_pages(input.pages)?;
    ensure_authors_exist(pool, &input.author_ids).await?;

    let book_id = queries::insert_book(
        pool,
        &NewBook {
            title: input.title,
            description: input.description,
            year: input.year,
            image_file: input.image_file,
            pages: input.pages,
            genre: input.genre,
            format: input.format,
        },
    )
    .await?;
    queries::set_book_authors(pool, book_id, &input.author_ids).await?;

    tracing::info!(book_id, "book created");
    get_book(pool, book_id).await
}

/// Apply a partial update; replacing author_ids re-links the junction rows
pub async fn update_book(pool: &SqlitePool, book_id: i64, input: BookUpdate) -> Result<BookDetails> {
    let mut book = queries::find_book_by_id(pool, book_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Book with id {book_id} is not found")))?;

    if let Some(year) = input.year {
        validate_year(year)?;
        book.year = year;
    }
    if let Some(pages) = input.pages {
        validate_pages(pages)?;
        book.pages = pages;
    }
    if let Some(title) = input.title {
        book.title = title;
    }
    if let Some(description) = input.description {
        book.description = Some(description);
    }
    if let Some(image_file) = input.image_file {
        book.image_file = Some(image_file);
    }
    if let Some(genre) = input.genre {
        book.genre = genre;
    }
    if let Some(format) = input.format {
        book.format = format;
    }

    if let Some(author_ids) = &input.author_ids {
        ensure_authors_exist(pool, author_ids).await?;
        queries::set_book_authors(pool, book_id, author_ids).await?;
    }

    queries::update_book(pool, &book).await?;
    get_book(pool, book_id).await
}

/// Delete a book; its reviews and author links cascade
pub async fn delete_book(pool: &SqlitePool, book_id: i64) -> Result<()> {
    let deleted = queries::delete_book(pool, book_id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found(format!(
            "Book with id {book_id} is not found"
        )));
    }
    tracing::info!(book_id, "book deleted");
    Ok(())
}
