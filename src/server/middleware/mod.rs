//! Request processing shared by the controllers.
//!
//! - `auth` - Bearer token guard resolving the authenticated user
//! - `cookie` - Refresh token cookie construction and parsing
//! - `extract` - JSON body extractor with declarative validation
//! - `logging` - One-line access log per request

pub mod auth;
pub mod cookie;
pub mod extract;
pub mod logging;
