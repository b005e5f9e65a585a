/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # IronHL7
//!
//! An HL7 v2 pipe-delimited message codec for Rust.
//!
//! IronHL7 parses HL7 v2 wire text into a flat message model, serializes it
//! back, and serves both operations over a small HTTP API.
//!
//! ## Features
//!
//! - **Zero-copy parsing**: Segment views reference the original text
//! - **SIMD-accelerated**: Uses `memchr` for delimiter search
//! - **Lossless**: Fields are opaque strings, so components survive a round trip
//! - **Async support**: HTTP front end built on Tokio and axum
//!
//! ## Quick Start
//!
//! ```rust
//! use ironhl7::prelude::*;
//!
//! let mut msg = Message::new();
//! msg.add_segment("MSH", ["^~\\&", "APP", "FAC"]);
//! msg.add_segment("PID", ["", "12345", "", "", "Doe^John"]);
//!
//! let wire = serialize(&msg);
//! assert_eq!(wire, "MSH|^~\\&|APP|FAC\rPID||12345|||Doe^John\r");
//! assert_eq!(parse(&wire).unwrap(), msg);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Message model, delimiters, and error definitions
//! - [`pipe`]: Pipe-delimited parsing and serialization
//! - [`server`]: HTTP server, client, and routes

pub mod core {
    //! Message model, delimiters, and error definitions.
    pub use ironhl7_core::*;
}

pub mod pipe {
    //! Pipe-delimited parsing and serialization.
    pub use ironhl7_pipe::*;
}

pub mod server {
    //! HTTP server, client, and routes.
    pub use ironhl7_server::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    // Core types
    pub use ironhl7_core::{
        FormatError, Hl7Error, Message, Result, ScanError, Segment, SegmentRef, Timestamp,
    };

    // Pipe encoding
    pub use ironhl7_pipe::{
        Decoder, Encoder, parse, parse_bytes, parse_reader, sample_message, serialize,
    };

    // Server
    pub use ironhl7_server::{
        ApiResponse, BuildInfo, Client, ClientError, Server, ServerConfig, ServerError, router,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let msg = sample_message();
        let wire = serialize(&msg);
        assert_eq!(parse(&wire).unwrap(), msg);
        assert_eq!(parse_bytes(wire.as_bytes()).unwrap(), msg);
    }

    #[test]
    fn test_codec_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Message>();
        assert_send_sync::<Segment>();
        assert_send_sync::<Decoder<'static>>();
        assert_send_sync::<Encoder>();
        assert_send_sync::<Client>();
        assert_send_sync::<ServerConfig>();
    }

    #[test]
    fn test_module_paths() {
        assert_eq!(super::core::delimiters::FIELD_SEPARATOR, b'|');
        let config = super::server::ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8080");
    }
}
