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

//! Request extractor for the authenticated user
//!
//! Protected handlers take a `CurrentUser` argument; extraction reads the
//! `Authorization: Bearer` header, validates the token, and resolves the
//! subject to a user row. A missing header, invalid token, or unresolvable
//! subject all reject with 401.

use crate::auth::token;
use crate::error::ApiError;
use crate::http::AppState;
use crate::storage::models::User;
use crate::storage::queries;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

/// The user resolved from the request's bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| ApiError::unauthorized("Could not validate credentials"))?;

        let username = token::decode_subject(&state.auth, bearer.token())?;

        let user = queries::find_user_by_username(state.db.pool(), &username)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        Ok(CurrentUser(user))
    }
}
