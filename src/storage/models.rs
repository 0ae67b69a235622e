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

//! Database models for Bookrate
//!
//! Entity structs map 1:1 to table rows; `New*` structs carry the fields a
//! caller supplies on insert. Composite response shapes (book with authors,
//! user with reviews) live next to the service functions that build them.
//!
//! # SQLite Adaptations
//! - Enums stored as TEXT (their wire spelling)
//! - Timestamps stored as TEXT, `CURRENT_TIMESTAMP` default
//! - Many-to-many relationships use the author_book junction table

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// ENUMS
// ============================================================================

/// Book genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum Genre {
    Mystery,
    Thriller,
    Horror,
    Historical,
    Romance,
    Fantasy,
    #[serde(rename = "Science Fiction")]
    #[sqlx(rename = "Science Fiction")]
    ScienceFiction,
}

/// Physical format of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum BookFormat {
    Paper,
    Electronic,
}

/// User rank tier, derived from review count
///
/// Ordered lowest to highest; the derive order makes `Ord` follow the tier
/// progression so monotonicity can be asserted directly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
pub enum UserRank {
    #[serde(rename = "9 kyu")]
    #[sqlx(rename = "9 kyu")]
    Kyu9,
    #[serde(rename = "8 kyu")]
    #[sqlx(rename = "8 kyu")]
    Kyu8,
    #[serde(rename = "7 kyu")]
    #[sqlx(rename = "7 kyu")]
    Kyu7,
    #[serde(rename = "6 kyu")]
    #[sqlx(rename = "6 kyu")]
    Kyu6,
    #[serde(rename = "5 kyu")]
    #[sqlx(rename = "5 kyu")]
    Kyu5,
    #[serde(rename = "4 kyu")]
    #[sqlx(rename = "4 kyu")]
    Kyu4,
    #[serde(rename = "3 kyu")]
    #[sqlx(rename = "3 kyu")]
    Kyu3,
    #[serde(rename = "2 kyu")]
    #[sqlx(rename = "2 kyu")]
    Kyu2,
    #[serde(rename = "1 kyu")]
    #[sqlx(rename = "1 kyu")]
    Kyu1,
    #[serde(rename = "1 dan")]
    #[sqlx(rename = "1 dan")]
    Dan1,
}

impl UserRank {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRank::Kyu9 => "9 kyu",
            UserRank::Kyu8 => "8 kyu",
            UserRank::Kyu7 => "7 kyu",
            UserRank::Kyu6 => "6 kyu",
            UserRank::Kyu5 => "5 kyu",
            UserRank::Kyu4 => "4 kyu",
            UserRank::Kyu3 => "3 kyu",
            UserRank::Kyu2 => "2 kyu",
            UserRank::Kyu1 => "1 kyu",
            UserRank::Dan1 => "1 dan",
        }
    }
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Book row
///
/// `rating` is derived state: the arithmetic mean of the book's current
/// review ratings, 0 when it has none. Only the rating aggregator writes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub year: i32,
    pub image_file: Option<String>,
    pub rating: f64,
    pub pages: i32,
    pub genre: Genre,
    pub format: BookFormat,
}

/// Author row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub image_file: Option<String>,
}

/// Review row - belongs to exactly one book and one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub text: Option<String>,
    pub rating: i32,
    pub created_at: NaiveDateTime,
}

/// User row
///
/// `rank` is derived from the user's review count. The password hash never
/// serializes into responses.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub rank: UserRank,
    pub created_at: NaiveDateTime,
}

// ============================================================================
// INSERT SHAPES
// ============================================================================

/// Fields for inserting a book (rating starts at 0)
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub year: i32,
    pub image_file: Option<String>,
    pub pages: i32,
    pub genre: Genre,
    pub format: BookFormat,
}

/// Fields for inserting an author
#[derive(Debug, Clone, Default)]
pub struct NewAuthor {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub image_file: Option<String>,
}

/// Fields for inserting a review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: i64,
    pub book_id: i64,
    pub text: Option<String>,
    pub rating: i32,
}

/// Fields for inserting a user (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
