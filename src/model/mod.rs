//! Data transfer objects shared by the HTTP API.
//!
//! These types define the JSON contract of every endpoint. Request DTOs carry
//! `validator` rules, and all DTOs derive `ToSchema` for the OpenAPI document.

pub mod api;
pub mod auth;
pub mod user;
pub mod wallet;
