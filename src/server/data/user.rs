//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records in the
//! database: creation at registration, lookups for authentication and uniqueness
//! checks, and the single-column updates applied by verification and profile flows.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::model::user::{CreateUserParam, User};

/// Repository providing database operations for user accounts.
///
/// This struct holds a reference to a database connection or open transaction and
/// provides methods for creating, reading and updating user records.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection or transaction
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Arguments
    /// - `param` - Normalized username and email with the already hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique constraint violations on
    ///   email or username
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            username: ActiveValue::Set(param.username),
            email: ActiveValue::Set(param.email),
            password_hash: ActiveValue::Set(param.password_hash),
            is_active: ActiveValue::Set(param.is_active),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by normalized (lower-case) email address.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that email
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Checks whether any account uses the normalized email address.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether any account uses the username, ignoring case.
    ///
    /// # Arguments
    /// - `username` - Trimmed username in any case
    ///
    /// # Returns
    /// - `Ok(true)` - A user with the same lower-cased username exists
    /// - `Ok(false)` - Username is free
    /// - `Err(DbErr)` - Database error during count query
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(Expr::cust_with_values(
                "LOWER(username) = ?",
                [username.to_lowercase()],
            ))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Marks a user as active after email verification.
    ///
    /// # Returns
    /// - `Ok(())` - Flag set (or no matching user found)
    /// - `Err(DbErr)` - Database error during update
    pub async fn activate(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(entity::user::Column::IsActive, Expr::value(true))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Replaces the user's email address with an already normalized value.
    pub async fn update_email(&self, user_id: i32, email: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(entity::user::Column::Email, Expr::value(email))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Replaces the user's password hash.
    pub async fn update_password_hash(&self, user_id: i32, password_hash: &str) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(user_id))
            .col_expr(entity::user::Column::PasswordHash, Expr::value(password_hash))
            .exec(self.db)
            .await?;
        Ok(())
    }
}
