//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod events;
pub mod health;
pub mod hunger;
pub mod root;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::{ApiResult, json_config};
