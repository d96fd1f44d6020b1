//! External service integrations

pub mod c4c;
