//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Each entity has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function for quick
//! default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::user::create_user(&db).await?;
//!     let account = factory::user_account::create_account(&db, user.id, "USD").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let user = factory::user::UserFactory::new(&db)
//!     .username("alice")
//!     .email("alice@example.com")
//!     .active(false)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users with a hashed password
//! - `user_account` - Per-currency wallet accounts
//! - `user_account_tx` - Wallet ledger entries
//! - `refresh_token` - Refresh token rows
//! - `email_verification_token` - Email verification tokens
//! - `email_change_token` - Pending email changes
//! - `password_change_token` - Pending password changes
//! - `helpers` - ID generation and multi-entity helpers

pub mod email_change_token;
pub mod email_verification_token;
pub mod helpers;
pub mod password_change_token;
pub mod refresh_token;
pub mod user;
pub mod user_account;
pub mod user_account_tx;

pub use email_change_token::create_email_change_token;
pub use email_verification_token::create_verification_token;
pub use password_change_token::create_password_change_token;
pub use refresh_token::create_refresh_token;
pub use user::create_user;
pub use user_account::create_account;
pub use user_account_tx::create_tx;
