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

//! Database query functions
//!
//! Repository pattern per entity type: plain async functions over the shared
//! pool, one per statement. Derived-state writes (book rating, user rank)
//! are separate setters so the aggregation logic in `catalog` owns the
//! decision of when to call them.

use crate::error::Result;
use crate::storage::models::*;
use sqlx::SqlitePool;

// ============================================================================
// BOOK QUERIES
// ============================================================================

/// Insert a new book, returns its id (rating starts at 0)
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO books (title, description, year, image_file, pages, genre, format)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.title)
    .bind(&book.description)
    .bind(book.year)
    .bind(&book.image_file)
    .bind(book.pages)
    .bind(book.genre)
    .bind(book.format)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find book by ID
pub async fn find_book_by_id(pool: &SqlitePool, book_id: i64) -> Result<Option<Book>> {
    let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
        .bind(book_id)
        .fetch_optional(pool)
        .await?;

    Ok(book)
}

/// List all books
pub async fn list_books(pool: &SqlitePool) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(books)
}

/// List books linked to an author
pub async fn list_books_by_author(pool: &SqlitePool, author_id: i64) -> Result<Vec<Book>> {
    let books = sqlx::query_as::<_, Book>(
        r#"
        SELECT b.* FROM books b
        INNER JOIN author_book ab ON b.id = ab.book_id
        WHERE ab.author_id = ?
        ORDER BY b.id
        "#,
    )
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    Ok(books)
}

/// Update an existing book's own fields (rating excluded, see set_book_rating)
pub async fn update_book(pool: &SqlitePool, book: &Book) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE books SET
            title = ?, description = ?, year = ?, image_file = ?,
            pages = ?, genre = ?, format = ?
        WHERE id = ?
        "#,
    )
    .bind(&book.title)
    .bind(&book.description)
    .bind(book.year)
    .bind(&book.image_file)
    .bind(book.pages)
    .bind(book.genre)
    .bind(book.format)
    .bind(book.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Store the recomputed mean rating for a book
pub async fn set_book_rating(pool: &SqlitePool, book_id: i64, rating: f64) -> Result<()> {
    sqlx::query("UPDATE books SET rating = ? WHERE id = ?")
        .bind(rating)
        .bind(book_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete a book (reviews and author links cascade)
///
/// Returns the number of deleted rows (0 when the book didn't exist).
pub async fn delete_book(pool: &SqlitePool, book_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(book_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// ============================================================================
// BOOK <-> AUTHOR LINKS
// ============================================================================

/// Count how many of the given author ids exist
///
/// Callers compare against `ids.len()` to reject unknown authors up front.
pub async fn count_existing_authors(pool: &SqlitePool, ids: &[i64]) -> Result<i64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT COUNT(*) FROM authors WHERE id IN ({placeholders})");

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    Ok(query.fetch_one(pool).await?)
}

/// Replace a book's author links with the given set
pub async fn set_book_authors(pool: &SqlitePool, book_id: i64, author_ids: &[i64]) -> Result<()> {
    sqlx::query("DELETE FROM author_book WHERE book_id = ?")
        .bind(book_id)
        .execute(pool)
        .await?;

    for author_id in author_ids {
        sqlx::query("INSERT OR IGNORE INTO author_book (book_id, author_id) VALUES (?, ?)")
            .bind(book_id)
            .bind(author_id)
            .execute(pool)
            .await?;
    }

    Ok(())
}

/// Authors linked to a book
pub async fn find_authors_by_book(pool: &SqlitePool, book_id: i64) -> Result<Vec<Author>> {
    let authors = sqlx::query_as::<_, Author>(
        r#"
        SELECT a.* FROM authors a
        INNER JOIN author_book ab ON a.id = ab.author_id
        WHERE ab.book_id = ?
        ORDER BY a.id
        "#,
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(authors)
}

// ============================================================================
// AUTHOR QUERIES
// ============================================================================

/// Insert a new author, returns its id
pub async fn insert_author(pool: &SqlitePool, author: &NewAuthor) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO authors (first_name, last_name, middle_name, image_file)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&author.first_name)
    .bind(&author.last_name)
    .bind(&author.middle_name)
    .bind(&author.image_file)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find author by ID
pub async fn find_author_by_id(pool: &SqlitePool, author_id: i64) -> Result<Option<Author>> {
    let author = sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = ?")
        .bind(author_id)
        .fetch_optional(pool)
        .await?;

    Ok(author)
}

/// List all authors
pub async fn list_authors(pool: &SqlitePool) -> Result<Vec<Author>> {
    let authors = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY id")
        .fetch_all(pool)
        .await?;

    Ok(authors)
}

/// Update an existing author
pub async fn update_author(pool: &SqlitePool, author: &Author) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE authors SET
            first_name = ?, last_name = ?, middle_name = ?, image_file = ?
        WHERE id = ?
        "#,
    )
    .bind(&author.first_name)
    .bind(&author.last_name)
    .bind(&author.middle_name)
    .bind(&author.image_file)
    .bind(author.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete an author
///
/// The junction rows cascade; books themselves are left in place.
pub async fn delete_author(pool: &SqlitePool, author_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM authors WHERE id = ?")
        .bind(author_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

// ============================================================================
// REVIEW QUERIES
// ============================================================================

/// Insert a new review, returns its id
pub async fn insert_review(pool: &SqlitePool, review: &NewReview) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO reviews (user_id, book_id, text, rating)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(review.user_id)
    .bind(review.book_id)
    .bind(&review.text)
    .bind(review.rating)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find review by ID
pub async fn find_review_by_id(pool: &SqlitePool, review_id: i64) -> Result<Option<Review>> {
    let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?")
        .bind(review_id)
        .fetch_optional(pool)
        .await?;

    Ok(review)
}

/// List reviews with pagination
pub async fn list_reviews(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// All reviews for a book
pub async fn list_reviews_by_book(pool: &SqlitePool, book_id: i64) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE book_id = ? ORDER BY id",
    )
    .bind(book_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// All reviews written by a user
pub async fn list_reviews_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE user_id = ? ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Update an existing review
pub async fn update_review(pool: &SqlitePool, review: &Review) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE reviews SET
            user_id = ?, book_id = ?, text = ?, rating = ?
        WHERE id = ?
        "#,
    )
    .bind(review.user_id)
    .bind(review.book_id)
    .bind(&review.text)
    .bind(review.rating)
    .bind(review.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a review
pub async fn delete_review(pool: &SqlitePool, review_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = ?")
        .bind(review_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Mean rating over a book's current reviews
///
/// Returns `None` when the book has no reviews (SQL AVG over zero rows).
pub async fn average_rating_for_book(pool: &SqlitePool, book_id: i64) -> Result<Option<f64>> {
    let avg: Option<f64> =
        sqlx::query_scalar("SELECT AVG(CAST(rating AS REAL)) FROM reviews WHERE book_id = ?")
            .bind(book_id)
            .fetch_one(pool)
            .await?;

    Ok(avg)
}

/// Number of reviews a user has written
pub async fn count_reviews_by_user(pool: &SqlitePool, user_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Distinct ids of the books a user has reviewed
///
/// Used to recompute ratings after the user's reviews cascade away.
pub async fn book_ids_reviewed_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>> {
    let ids: Vec<i64> =
        sqlx::query_scalar("SELECT DISTINCT book_id FROM reviews WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(ids)
}

// ============================================================================
// USER QUERIES
// ============================================================================

/// Insert a new user, returns its id (rank starts at the lowest tier)
pub async fn insert_user(pool: &SqlitePool, user: &NewUser) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find user by ID
pub async fn find_user_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Find user by username
pub async fn find_user_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Find user by email
pub async fn find_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// List users with pagination
pub async fn list_users(pool: &SqlitePool, offset: i64, limit: i64) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(users)
}

/// Update an existing user's account fields (rank excluded, see set_user_rank)
pub async fn update_user(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE users SET
            username = ?, email = ?, password_hash = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Store the recomputed rank for a user
pub async fn set_user_rank(pool: &SqlitePool, user_id: i64, rank: UserRank) -> Result<()> {
    sqlx::query("UPDATE users SET rank = ? WHERE id = ?")
        .bind(rank)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete a user (their reviews cascade)
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::Database;

    fn sample_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            description: None,
            year: 1999,
            image_file: None,
            pages: 320,
            genre: Genre::Fantasy,
            format: BookFormat::Paper,
        }
    }

    fn sample_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{username}@mail.com"),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find_book() {
        let db = Database::new_in_memory().await.expect("Failed to create database");

        let book_id = insert_book(db.pool(), &sample_book("The Hobbit"))
            .await
            .expect("Failed to insert book");
        assert!(book_id > 0);

        let found = find_book_by_id(db.pool(), book_id)
            .await
            .expect("Failed to find book")
            .expect("Book missing");

        assert_eq!(found.title, "The Hobbit");
        assert_eq!(found.rating, 0.0);
        assert_eq!(found.genre, Genre::Fantasy);
        assert_eq!(found.format, BookFormat::Paper);
    }

    #[tokio::test]
    async fn test_book_author_links() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        let book_id = insert_book(pool, &sample_book("Dune")).await.unwrap();
        let a1 = insert_author(
            pool,
            &NewAuthor {
                last_name: Some("Herbert".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let a2 = insert_author(pool, &NewAuthor::default()).await.unwrap();

        set_book_authors(pool, book_id, &[a1, a2]).await.unwrap();
        let authors = find_authors_by_book(pool, book_id).await.unwrap();
        assert_eq!(authors.len(), 2);

        // Replacing links drops the old set
        set_book_authors(pool, book_id, &[a2]).await.unwrap();
        let authors = find_authors_by_book(pool, book_id).await.unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].id, a2);

        assert_eq!(count_existing_authors(pool, &[a1, a2]).await.unwrap(), 2);
        assert_eq!(count_existing_authors(pool, &[a1, 999]).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_author_delete_detaches_books() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        let book_id = insert_book(pool, &sample_book("Orphaned")).await.unwrap();
        let author_id = insert_author(pool, &NewAuthor::default()).await.unwrap();
        set_book_authors(pool, book_id, &[author_id]).await.unwrap();

        assert_eq!(delete_author(pool, author_id).await.unwrap(), 1);

        // Book survives, link is gone
        assert!(find_book_by_id(pool, book_id).await.unwrap().is_some());
        assert!(find_authors_by_book(pool, book_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_average_rating_is_none_without_reviews() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        let book_id = insert_book(pool, &sample_book("Unreviewed")).await.unwrap();
        assert_eq!(average_rating_for_book(pool, book_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_average_rating_over_reviews() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        let book_id = insert_book(pool, &sample_book("Rated")).await.unwrap();
        let user_id = insert_user(pool, &sample_user("john123")).await.unwrap();

        for rating in [4, 1] {
            insert_review(
                pool,
                &NewReview {
                    user_id,
                    book_id,
                    text: None,
                    rating,
                },
            )
            .await
            .unwrap();
        }

        let avg = average_rating_for_book(pool, book_id).await.unwrap();
        assert_eq!(avg, Some(2.5));
    }

    #[tokio::test]
    async fn test_user_uniqueness_enforced() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        insert_user(pool, &sample_user("john123")).await.unwrap();
        let dup = insert_user(pool, &sample_user("john123")).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_user_delete_cascades_reviews() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        let book_id = insert_book(pool, &sample_book("Cascade")).await.unwrap();
        let user_id = insert_user(pool, &sample_user("jane123")).await.unwrap();
        insert_review(
            pool,
            &NewReview {
                user_id,
                book_id,
                text: Some("good".to_string()),
                rating: 5,
            },
        )
        .await
        .unwrap();

        assert_eq!(book_ids_reviewed_by_user(pool, user_id).await.unwrap(), vec![book_id]);
        assert_eq!(delete_user(pool, user_id).await.unwrap(), 1);
        assert!(list_reviews_by_book(pool, book_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_pagination() {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        let pool = db.pool();

        let book_id = insert_book(pool, &sample_book("Paged")).await.unwrap();
        let user_id = insert_user(pool, &sample_user("reader")).await.unwrap();
        for i in 0..5 {
            insert_review(
                pool,
                &NewReview {
                    user_id,
                    book_id,
                    text: None,
                    rating: (i % 5) + 1,
                },
            )
            .await
            .unwrap();
        }

        let page = list_reviews(pool, 2, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, 3);
    }
}
