/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error types for the HTTP front end.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by the server loop.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Listener I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by [`crate::client::Client`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connecting, sending or reading the reply failed.
    #[error("error sending request: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not a valid envelope.
    #[error("error decoding response: {0}")]
    Json(#[from] serde_json::Error),

    /// The exchange did not finish in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}
