//! Response bodies shared by every endpoint

use serde::Serialize;

/// Body of every non-2xx response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub code: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}
