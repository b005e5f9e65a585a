/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! HTTP server loop.
//!
//! Connections are driven by hyper's HTTP/1.1 implementation, one task per
//! connection, with the [`axum::Router`] from [`crate::routes`] as the
//! service. A connection that does not deliver a complete request head
//! within [`ServerConfig::header_read_timeout`] is closed, whether it is
//! new or idling between kept-alive requests.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::routes;
use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Pause after an accept failure that is not tied to a single connection.
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(500);

/// Time in-flight connections get to finish once shutdown is requested.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// HTTP front end for the HL7 codec.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    router: Router,
}

impl Server {
    /// Creates a server with the standard routes.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let router = routes::router(&config);
        Self::with_router(config, router)
    }

    /// Creates a server with a custom router.
    #[must_use]
    pub fn with_router(config: ServerConfig, router: Router) -> Self {
        Self { config, router }
    }

    /// Returns the server configuration.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds the configured address and serves forever.
    ///
    /// # Errors
    /// Returns `ServerError::Bind` if the address cannot be bound.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        self.serve(listener, std::future::pending()).await
    }

    /// Serves connections from `listener` until `shutdown` resolves, then
    /// waits up to [`SHUTDOWN_GRACE`] for open connections to finish.
    ///
    /// # Errors
    /// Returns `ServerError::Io` if the listener address cannot be read.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "HL7 server listening");

        let mut http = http1::Builder::new();
        http.timer(TokioTimer::new())
            .header_read_timeout(self.config.header_read_timeout)
            .keep_alive(true);
        let graceful = GracefulShutdown::new();

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("shutdown requested, no longer accepting connections");
                    break;
                }
                accepted = listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(conn) => conn,
                        Err(err) => {
                            match accept_error_backoff(&err) {
                                Some(delay) => {
                                    error!(error = %err, ?delay, "accept failed, backing off");
                                    tokio::time::sleep(delay).await;
                                }
                                None => debug!(error = %err, "connection dropped before accept"),
                            }
                            continue;
                        }
                    };
                    debug!(%peer, "connection accepted");

                    let service = TowerToHyperService::new(self.router.clone());
                    let conn = graceful.watch(http.serve_connection(TokioIo::new(stream), service));
                    tokio::spawn(async move {
                        if let Err(err) = conn.await {
                            debug!(%peer, error = %err, "connection closed with error");
                        }
                    });
                }
            }
        }

        if tokio::time::timeout(SHUTDOWN_GRACE, graceful.shutdown())
            .await
            .is_err()
        {
            warn!(grace = ?SHUTDOWN_GRACE, "connections still open after shutdown grace period");
        }
        Ok(())
    }
}

/// Returns how long to wait before accepting again after `err`.
///
/// Errors that only concern the connection being accepted retry at once.
/// Anything else, such as running out of file descriptors, would fail again
/// immediately and gets [`ACCEPT_ERROR_BACKOFF`].
#[must_use]
pub fn accept_error_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset => None,
        _ => Some(ACCEPT_ERROR_BACKOFF),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::config::BuildInfo;
    use ironhl7_core::message::Message;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;
    use tokio::task::JoinHandle;

    async fn spawn_server(
        configure: impl FnOnce(ServerConfig) -> ServerConfig,
    ) -> (SocketAddr, oneshot::Sender<()>, JoinHandle<Result<(), ServerError>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let config = configure(
            ServerConfig::new("127.0.0.1", addr.port())
                .with_build_info(BuildInfo::new("0.1.0", "2026-10-18")),
        );
        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(Server::new(config).serve(listener, async move {
            let _ = rx.await;
        }));
        (addr, tx, handle)
    }

    async fn read_reply(stream: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let _ = stream.read_to_end(&mut raw).await;
        String::from_utf8_lossy(&raw).into_owned()
    }

    #[tokio::test]
    async fn test_client_parse_round_trip() {
        let (addr, shutdown, handle) = spawn_server(|c| c).await;
        let client = Client::new(addr.to_string());

        let mut msg = Message::new();
        msg.add_segment("MSH", ["^~\\&", "APP", "FAC"]);
        msg.add_segment("PID", ["", "123", "", "", "Doe^John"]);

        let resp = client.send_message("/parse", &msg).await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, Some(msg));

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_client_sample_message() {
        let (addr, shutdown, handle) = spawn_server(|c| c).await;
        let client = Client::new(addr.to_string());

        let resp = client.sample_message("/generate").await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.message, "HL7 message generated successfully");
        assert_eq!(resp.data.unwrap().len(), 2);

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_keep_alive_serves_multiple_requests() {
        let (addr, shutdown, handle) = spawn_server(|c| c).await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        stream
            .write_all(
                b"GET /health HTTP/1.1\r\nHost: hl7\r\n\r\n\
                  GET /version HTTP/1.1\r\nHost: hl7\r\nConnection: close\r\n\r\n",
            )
            .await
            .unwrap();
        let text = read_reply(&mut stream).await;

        assert_eq!(text.matches("HTTP/1.1 200 OK").count(), 2);
        assert!(text.contains(r#""message":"Service is healthy""#));
        assert!(text.ends_with(r#"{"version":"0.1.0","buildDate":"2026-10-18"}"#));

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_malformed_request_gets_400() {
        let (addr, shutdown, handle) = spawn_server(|c| c).await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        stream.write_all(b"garbage\r\n\r\n").await.unwrap();
        let text = read_reply(&mut stream).await;
        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{text}");

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_maximal_content_length_is_refused_and_server_keeps_serving() {
        let (addr, shutdown, handle) = spawn_server(|c| c.with_max_request_size(128)).await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        let head = format!(
            "POST /parse HTTP/1.1\r\nHost: hl7\r\nContent-Length: {}\r\n\r\nMSH|a",
            u64::MAX
        );
        stream.write_all(head.as_bytes()).await.unwrap();
        let text = read_reply(&mut stream).await;
        assert!(text.starts_with("HTTP/1.1 4"), "{text}");

        let resp = Client::new(addr.to_string())
            .sample_message("/health")
            .await
            .unwrap();
        assert!(resp.success);

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_oversized_body_gets_413() {
        let (addr, shutdown, handle) = spawn_server(|c| c.with_max_request_size(128)).await;

        let mut msg = Message::new();
        msg.add_segment("OBX", ["x".repeat(512)]);
        let resp = Client::new(addr.to_string())
            .send_message("/parse", &msg)
            .await
            .unwrap();
        assert!(!resp.success);
        assert!(resp.message.starts_with("Error reading request body: "));

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_stalled_request_head_is_closed() {
        let (addr, shutdown, handle) =
            spawn_server(|c| c.with_header_read_timeout(Duration::from_millis(200))).await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        stream.write_all(b"POST /parse HTTP/1.1\r\nHost: hl7\r\n").await.unwrap();
        let closed = tokio::time::timeout(Duration::from_secs(5), read_reply(&mut stream)).await;
        assert!(closed.is_ok(), "connection was not closed after the head deadline");

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_idle_keep_alive_connection_is_closed() {
        let (addr, shutdown, handle) =
            spawn_server(|c| c.with_header_read_timeout(Duration::from_millis(200))).await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: hl7\r\n\r\n")
            .await
            .unwrap();
        let text = tokio::time::timeout(Duration::from_secs(5), read_reply(&mut stream))
            .await
            .expect("idle connection was not closed");
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));

        let _ = shutdown.send(());
        handle.await.unwrap().unwrap();
    }

    #[test]
    fn test_accept_error_backoff() {
        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionRefused,
        ] {
            assert_eq!(accept_error_backoff(&io::Error::from(kind)), None);
        }

        // EMFILE: per-process descriptor limit reached.
        let exhausted = io::Error::from_raw_os_error(24);
        assert_eq!(accept_error_backoff(&exhausted), Some(ACCEPT_ERROR_BACKOFF));
        let other = io::Error::other("listener broken");
        assert_eq!(accept_error_backoff(&other), Some(ACCEPT_ERROR_BACKOFF));
    }

    #[tokio::test]
    async fn test_run_reports_bind_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = Server::new(ServerConfig::new("127.0.0.1", port));

        let err = server.run().await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
        drop(listener);
    }
}
