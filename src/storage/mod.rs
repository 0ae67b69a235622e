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

//! Database storage and models
//!
//! All persistence goes through this module: a pooled SQLite connection
//! (`Database`), runtime migrations, entity models, and one query function
//! per statement.
//!
//! # Database Schema
//! - users: account data plus derived rank label
//! - authors: name parts and image reference
//! - books: catalog data plus derived mean rating
//! - author_book: many-to-many junction
//! - reviews: text + 1-5 rating, owned by one book and one user

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use models::{
    Author, Book, BookFormat, Genre, NewAuthor, NewBook, NewReview, NewUser, Review, User,
    UserRank,
};
