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

//! Rating aggregation and rank calculation
//!
//! The two pieces of derived state in the catalog:
//! - a book's rating is the arithmetic mean of its current review ratings,
//!   0 when it has none
//! - a user's rank is a step function of their review count
//!
//! `refresh_book_rating` and `refresh_user_rank` recompute and store those
//! values; callers in `catalog::reviews` and `catalog::users` invoke them
//! after every mutation that touches a review set.

use crate::error::Result;
use crate::storage::models::UserRank;
use crate::storage::queries;
use sqlx::SqlitePool;

/// Rank tier breakpoints
///
/// Each entry is the smallest review count that earns the rank; counts below
/// the first breakpoint stay at the lowest tier. The top tier opens at 90.
const RANK_BREAKPOINTS: &[(i64, UserRank)] = &[
    (5, UserRank::Kyu8),
    (10, UserRank::Kyu7),
    (20, UserRank::Kyu6),
    (30, UserRank::Kyu5),
    (40, UserRank::Kyu4),
    (50, UserRank::Kyu3),
    (60, UserRank::Kyu2),
    (75, UserRank::Kyu1),
    (90, UserRank::Dan1),
];

/// Map a review count to a rank label
pub fn rank_for_review_count(review_count: i64) -> UserRank {
    let mut rank = UserRank::Kyu9;
    for &(threshold, tier) in RANK_BREAKPOINTS {
        if review_count >= threshold {
            rank = tier;
        }
    }
    rank
}

/// Recompute and store a book's mean rating
///
/// Returns the stored value. Resets to 0 when the book has no reviews left.
pub async fn refresh_book_rating(pool: &SqlitePool, book_id: i64) -> Result<f64> {
    let rating = queries::average_rating_for_book(pool, book_id)
        .await?
        .unwrap_or(0.0);
    queries::set_book_rating(pool, book_id, rating).await?;

    Ok(rating)
}

/// Recompute and store a user's rank from their review count
pub async fn refresh_user_rank(pool: &SqlitePool, user_id: i64) -> Result<UserRank> {
    let count = queries::count_reviews_by_user(pool, user_id).await?;
    let rank = rank_for_review_count(count);
    queries::set_user_rank(pool, user_id, rank).await?;

    Ok(rank)
}
