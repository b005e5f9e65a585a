/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! JSON response envelope shared by the server and the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ironhl7_core::message::Message;
use serde::{Deserialize, Serialize};

/// Standard API response.
///
/// `data` is omitted from the JSON when there is no message to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Parsed or generated message, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Message>,
}

impl ApiResponse {
    /// Builds a successful envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: Option<Message>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    /// Builds a failed envelope with no data.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Wraps the envelope in a JSON response with `status`.
    #[must_use]
    pub fn respond(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
