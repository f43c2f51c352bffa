//! API models for request and response payloads

use serde::Serialize;
use std::str::FromStr;

use crate::error::ApiError;

pub mod watchlist;

/// Operation selected by the `action` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Add,
    Remove,
}

impl FromStr for Action {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(Action::Get),
            "add" => Ok(Action::Add),
            "remove" => Ok(Action::Remove),
            _ => Err(ApiError::BadRequest("Invalid action".to_string())),
        }
    }
}

/// Query string of the watchlist endpoint
#[derive(Debug, Default)]
pub struct ActionQuery {
    pub action: Option<String>,
}

impl ActionQuery {
    /// Build from raw query pairs; a repeated `action` key keeps its last value
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let action = pairs
            .into_iter()
            .filter(|(key, _)| key == "action")
            .map(|(_, value)| value)
            .last();

        Self { action }
    }
}

/// Body returned by successful mutations
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
