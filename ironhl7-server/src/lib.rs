/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # IronHL7 Server
//!
//! HTTP front end for the IronHL7 codec.
//!
//! This crate provides:
//! - **Routes**: `/parse`, `/generate`, `/serialize`, `/health` and `/version` on an `axum` router
//! - **Server**: hyper HTTP/1.1 connections with a head read deadline and graceful shutdown
//! - **Client**: `reqwest` client for the same endpoints
//!
//! ## Responses
//!
//! HL7 endpoints answer with a JSON envelope:
//!
//! ```json
//! {"success":true,"message":"HL7 message parsed successfully","data":{"Segments":[...]}}
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use api::ApiResponse;
pub use client::Client;
pub use config::{BuildInfo, ServerConfig};
pub use error::{ClientError, ServerError};
pub use routes::router;
pub use server::Server;
