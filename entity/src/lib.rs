//! SeaORM entity models for the PrimeMarket account schema.
//!
//! Each module mirrors one table created by the `migration` crate. Repositories in the
//! server crate convert these models into domain models at the data layer boundary.

pub mod prelude;

pub mod email_change_token;
pub mod email_verification_token;
pub mod password_change_token;
pub mod refresh_token;
pub mod user;
pub mod user_account;
pub mod user_account_tx;
