//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Uniqueness checks, credential verification and token lifecycles
//! - **Orchestration**: Coordinating repository calls with the mail transport
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running multi-write operations in one database transaction

pub mod auth;
pub mod email;
pub mod email_verification;
pub mod jwt;
pub mod refresh_token;
pub mod user_profile;
pub mod wallet;

#[cfg(test)]
mod test;
