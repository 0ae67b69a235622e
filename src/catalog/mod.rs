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

//! Catalog service layer
//!
//! Thin functions between the HTTP handlers and the query layer: input
//! validation, not-found/ownership checks, and maintenance of the two pieces
//! of derived state (book rating, user rank) in `rating`.

pub mod authors;
pub mod books;
pub mod rating;
pub mod reviews;
pub mod users;
