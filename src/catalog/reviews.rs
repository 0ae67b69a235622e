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

//! Review operations and the rating/rank maintenance around them
//!
//! Every mutation here must leave the derived state consistent: the affected
//! book's rating equals the mean of its remaining reviews (0 with none), and
//! the review author's rank matches their review count. Only the owner of a
//! review may update or delete it.

use crate::catalog::rating;
use crate::error::{ApiError, Result};
use crate::storage::models::{NewReview, Review, User};
use crate::storage::queries;
use serde::Deserialize;
use sqlx::SqlitePool;

/// Default page size for review listings
pub const DEFAULT_REVIEW_LIMIT: i64 = 10;
/// Maximum page size for review listings
pub const MAX_REVIEW_LIMIT: i64 = 15;

/// Request body for creating a review (the author comes from the token)
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub book_id: i64,
    #[serde(default)]
    pub text: Option<String>,
    pub rating: i32,
}

/// Request body for a partial review update
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub book_id: Option<i64>,
    pub text: Option<String>,
    pub rating: Option<i32>,
}

fn validate_rating(rating: i32) -> Result<()> {
    if !(1..=5).contains(&rating) {
        return Err(ApiError::validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_book_exists(pool: &SqlitePool, book_id: i64) -> Result<()> {
    if queries::find_book_by_id(pool, book_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "Book with id {book_id} is not found"
        )));
    }
    Ok(())
}

fn ensure_owner(review: &Review, user: &User) -> Result<()> {
    if review.user_id != user.id {
        return Err(ApiError::Forbidden("Access denied".to_string()));
    }
    Ok(())
}

/// Create a review, then refresh the book's rating and the author's rank
pub async fn create_review(pool: &SqlitePool, user: &User, input: ReviewCreate) -> Result<Review> {
    validate_rating(input.rating)?;
    ensure_book_exists(pool, input.book_id).await?;

    let review_id = queries::insert_review(
        pool,
        &NewReview {
            user_id: user.id,
            book_id: input.book_id,
            text: input.text,
            rating: input.rating,
        },
    )
    .await?;

    rating::refresh_book_rating(pool, input.book_id).await?;
    rating::refresh_user_rank(pool, user.id).await?;

    tracing::info!(review_id, book_id = input.book_id, user_id = user.id, "review created");
    get_review(pool, review_id).await
}

/// Fetch one review
pub async fn get_review(pool: &SqlitePool, review_id: i64) -> Result<Review> {
    queries::find_review_by_id(pool, review_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Review with id {review_id} is not found")))
}

/// List reviews with pagination; limit is clamped to the maximum page size
pub async fn list_reviews(
    pool: &SqlitePool,
    offset: Option<i64>,
    limit: Option<i64>,
) -> Result<Vec<Review>> {
    let offset = offset.unwrap_or(0).max(0);
    let limit = limit
        .unwrap_or(DEFAULT_REVIEW_LIMIT)
        .clamp(0, MAX_REVIEW_LIMIT);
    queries::list_reviews(pool, offset, limit).await
}

/// Update a review (owner only); refreshes every affected book's rating
pub async fn update_review(
    pool: &SqlitePool,
    user: &User,
    review_id: i64,
    input: ReviewUpdate,
) -> Result<Review> {
    let mut review = get_review(pool, review_id).await?;
    ensure_owner(&review, user)?;

    let old_book_id = review.book_id;

    if let Some(rating) = input.rating {
        validate_rating(rating)?;
        review.rating = rating;
    }
    if let Some(text) = input.text {
        review.text = Some(text);
    }
    if let Some(book_id) = input.book_id {
        ensure_book_exists(pool, book_id).await?;
        review.book_id = book_id;
    }

    queries::update_review(pool, &review).await?;

    // Both sides need a refresh when the review moved between books
    rating::refresh_book_rating(pool, review.book_id).await?;
    if review.book_id != old_book_id {
        rating::refresh_book_rating(pool, old_book_id).await?;
    }

    Ok(review)
}

/// Delete a review (owner only); resets the book's rating to 0 when it was
/// the last one
pub async fn delete_review(pool: &SqlitePool, user: &User, review_id: i64) -> Result<()> {
    let review = get_review(pool, review_id).await?;
    ensure_owner(&review, user)?;

    queries::delete_review(pool, review_id).await?;
    rating::refresh_book_rating(pool, review.book_id).await?;

    tracing::info!(review_id, book_id = review.book_id, "review deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::books::{self, BookCreate};
    use crate::catalog::users::{self, UserCreate};
    use crate::storage::database::Database;
    use crate::storage::models::{BookFormat, Genre};

    async fn setup_user(pool: &SqlitePool, name: &str) -> User {
        users::register(
            pool,
            UserCreate {
                username: name.to_string(),
                email: format!("{name}@mail.com"),
                password: "password1".to_string(),
                confirm_password: "password1".to_string(),
            },
        )
        .await
        .unwrap();
        queries::find_user_by_username(pool, name).await.unwrap().unwrap()
    }

    async fn setup_book(pool: &SqlitePool, title: &str) -> i64 {
        books::create_book(
            pool,
            BookCreate {
                title: title.to_string(),
                description: None,
                year: 2000,
                image_file: None,
                pages: 100,
                genre: Genre::Thriller,
                format: BookFormat::Electronic,
                author_ids: vec![],
            },
        )
        .await
        .unwrap()
        .book
        .id
    }

    #[tokio::test]
    async fn test_create_review_updates_mean() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "john123").await;
        let book_id = setup_book(pool, "Rated").await;

        for r in [4, 1] {
            create_review(
                pool,
                &user,
                ReviewCreate {
                    book_id,
                    text: None,
                    rating: r,
                },
            )
            .await
            .unwrap();
        }

        let book = queries::find_book_by_id(pool, book_id).await.unwrap().unwrap();
        assert_eq!(book.rating, 2.5);

        create_review(
            pool,
            &user,
            ReviewCreate {
                book_id,
                text: None,
                rating: 5,
            },
        )
        .await
        .unwrap();

        let book = queries::find_book_by_id(pool, book_id).await.unwrap().unwrap();
        assert!((book.rating - 10.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_create_review_unknown_book() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "john123").await;

        let err = create_review(
            pool,
            &user,
            ReviewCreate {
                book_id: 77,
                text: None,
                rating: 3,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_rating_bounds() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "john123").await;
        let book_id = setup_book(pool, "Bounds").await;

        for bad in [0, 6, -1] {
            let err = create_review(
                pool,
                &user,
                ReviewCreate {
                    book_id,
                    text: None,
                    rating: bad,
                },
            )
            .await
            .unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_update_review_moves_between_books() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "john123").await;
        let first = setup_book(pool, "First").await;
        let second = setup_book(pool, "Second").await;

        let review = create_review(
            pool,
            &user,
            ReviewCreate {
                book_id: first,
                text: None,
                rating: 4,
            },
        )
        .await
        .unwrap();

        update_review(
            pool,
            &user,
            review.id,
            ReviewUpdate {
                book_id: Some(second),
                rating: Some(2),
                text: None,
            },
        )
        .await
        .unwrap();

        // The old book lost its only review, the new one gained it
        let first_book = queries::find_book_by_id(pool, first).await.unwrap().unwrap();
        let second_book = queries::find_book_by_id(pool, second).await.unwrap().unwrap();
        assert_eq!(first_book.rating, 0.0);
        assert_eq!(second_book.rating, 2.0);
    }

    #[tokio::test]
    async fn test_ownership_enforced() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let owner = setup_user(pool, "owner1").await;
        let intruder = setup_user(pool, "intruder1").await;
        let book_id = setup_book(pool, "Guarded").await;

        let review = create_review(
            pool,
            &owner,
            ReviewCreate {
                book_id,
                text: None,
                rating: 5,
            },
        )
        .await
        .unwrap();

        let err = update_review(
            pool,
            &intruder,
            review.id,
            ReviewUpdate {
                rating: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = delete_review(pool, &intruder, review.id).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        // Owner can delete
        delete_review(pool, &owner, review.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_last_review_resets_rating() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "john123").await;
        let book_id = setup_book(pool, "Reset").await;

        let r1 = create_review(
            pool,
            &user,
            ReviewCreate {
                book_id,
                text: None,
                rating: 5,
            },
        )
        .await
        .unwrap();
        let r2 = create_review(
            pool,
            &user,
            ReviewCreate {
                book_id,
                text: None,
                rating: 1,
            },
        )
        .await
        .unwrap();

        delete_review(pool, &user, r1.id).await.unwrap();
        let book = queries::find_book_by_id(pool, book_id).await.unwrap().unwrap();
        assert_eq!(book.rating, 1.0);

        delete_review(pool, &user, r2.id).await.unwrap();
        let book = queries::find_book_by_id(pool, book_id).await.unwrap().unwrap();
        assert_eq!(book.rating, 0.0);
    }

    #[tokio::test]
    async fn test_review_count_drives_rank() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "climber").await;
        let book_id = setup_book(pool, "Ladder").await;

        for _ in 0..5 {
            create_review(
                pool,
                &user,
                ReviewCreate {
                    book_id,
                    text: None,
                    rating: 3,
                },
            )
            .await
            .unwrap();
        }

        let user = queries::find_user_by_id(pool, user.id).await.unwrap().unwrap();
        assert_eq!(user.rank, crate::storage::models::UserRank::Kyu8);
    }

    #[tokio::test]
    async fn test_list_reviews_limit_clamped() {
        let db = Database::new_in_memory().await.unwrap();
        let pool = db.pool();
        let user = setup_user(pool, "lister").await;
        let book_id = setup_book(pool, "Many").await;

        for _ in 0..20 {
            create_review(
                pool,
                &user,
                ReviewCreate {
                    book_id,
                    text: None,
                    rating: 3,
                },
            )
            .await
            .unwrap();
        }

        assert_eq!(list_reviews(pool, None, None).await.unwrap().len(), 10);
        assert_eq!(list_reviews(pool, None, Some(50)).await.unwrap().len(), 15);
        assert_eq!(list_reviews(pool, Some(18), Some(5)).await.unwrap().len(), 2);
    }
}
