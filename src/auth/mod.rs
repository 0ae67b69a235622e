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

//! Authentication helpers
//!
//! Password hashing (bcrypt), bearer token issuance/validation (HS256 JWT),
//! and the axum extractor that turns `Authorization: Bearer <token>` into a
//! `CurrentUser`.

pub mod extract;
pub mod password;
pub mod token;

pub use extract::CurrentUser;
pub use token::Claims;
