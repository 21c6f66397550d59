use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The body of every non-2xx response: `{"success": false, "rc": .., "message": ..}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    pub success: bool,
    pub rc: String,
    pub message: String,
}

impl FailureResponse {
    pub fn new<S: Display>(rc: &str, message: S) -> Self {
        Self { success: false, rc: rc.to_string(), message: message.to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

impl PingResponse {
    pub fn pong() -> Self {
        Self { message: "pong".into() }
    }
}
