//! Bookrate - REST backend for a book-review catalog
//!
//! Books, authors, reviews, and users with JWT authentication. The layering
//! is deliberately thin: HTTP handlers (`http`) call service functions
//! (`catalog`) which issue SQL through the query layer (`storage`).
//!
//! The one piece of non-trivial logic is derived state: a book's rating is
//! the mean of its current review ratings (recomputed on every review
//! mutation), and a user's rank is a step function of their review count.
//! Both live in [`catalog::rating`].
//!
//! # Usage Example
//! ```no_run
//! use bookrate::config::AuthConfig;
//! use bookrate::http::{router, AppState};
//! use bookrate::storage::Database;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let db = Database::new("./bookrate.db").await?;
//! let state = AppState {
//!     db,
//!     auth: AuthConfig::new("secret"),
//! };
//! let app = router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod storage;

pub use error::{ApiError, Result};
