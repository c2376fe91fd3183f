//! Small helpers shared by services: token primitives, password hashing and input
//! normalization.

pub mod normalize;
pub mod password;
pub mod token;
