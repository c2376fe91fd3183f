//! HTTP handlers.
//!
//! Controllers extract and validate request DTOs, enforce authentication through
//! `AuthGuard`, call a service and convert the returned domain model into a response DTO.

pub mod auth;
pub mod reachability;
pub mod user;
pub mod wallet;

#[cfg(test)]
mod test;
