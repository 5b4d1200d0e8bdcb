use std::time::Duration;

use reqwest::header::{ACCEPT, COOKIE};
use welcome_core::{RequestFailure, SessionApi, SessionInfo};

/// Native transport for the session API.
pub struct ReqwestSessionApi {
    client: reqwest::Client,
    cookie: Option<String>,
}

impl ReqwestSessionApi {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialised.
    pub fn new(cookie: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("welcome-tester/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, cookie })
    }

    fn with_cookie(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        }
    }
}

fn map_transport_error(err: &reqwest::Error, timeout_ms: Option<u32>) -> RequestFailure {
    if let Some(status) = err.status() {
        return RequestFailure::status(status.as_u16());
    }
    match timeout_ms {
        Some(ms) if err.is_timeout() => RequestFailure::timed_out(ms),
        _ if err.is_builder() => RequestFailure::transport("ERR_BUILDER", err.to_string()),
        _ if err.is_redirect() => RequestFailure::transport("ERR_REDIRECT", err.to_string()),
        _ if err.is_connect() || err.is_request() => RequestFailure::network(err),
        _ => RequestFailure::other(err.to_string()),
    }
}

/// Body read failures: a stalled body is a timeout, anything else a bad payload.
fn map_body_error(err: &reqwest::Error, timeout_ms: u32) -> RequestFailure {
    if err.is_timeout() {
        RequestFailure::timed_out(timeout_ms)
    } else {
        RequestFailure::other(format!("invalid session body: {err}"))
    }
}

#[async_trait::async_trait(?Send)]
impl SessionApi for ReqwestSessionApi {
    async fn fetch_session(
        &self,
        endpoint: &str,
        timeout_ms: u32,
    ) -> Result<SessionInfo, RequestFailure> {
        let limit = Duration::from_millis(u64::from(timeout_ms));
        let request = self
            .client
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .timeout(limit);
        let exchange = async {
            let response = self
                .with_cookie(request)
                .send()
                .await
                .map_err(|err| map_transport_error(&err, Some(timeout_ms)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(RequestFailure::status(status.as_u16()));
            }
            log::debug!("session endpoint answered {status}");
            response
                .json::<SessionInfo>()
                .await
                .map_err(|err| map_body_error(&err, timeout_ms))
        };
        // Covers headers and body alike.
        tokio::time::timeout(limit, exchange)
            .await
            .unwrap_or_else(|_| Err(RequestFailure::timed_out(timeout_ms)))
    }

    async fn logout(&self, endpoint: &str) -> Result<(), RequestFailure> {
        let response = self
            .with_cookie(self.client.post(endpoint))
            .send()
            .await
            .map_err(|err| map_transport_error(&err, None))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(RequestFailure::status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use std::net::SocketAddr;
    use welcome_core::{SessionFailure, TransportCode};

    async fn slow_session() -> &'static str {
        tokio::time::sleep(Duration::from_millis(500)).await;
        "{}"
    }

    async fn spawn_server() -> SocketAddr {
        let app = Router::new()
            .route(
                "/ok/api/session",
                get(|| async {
                    r#"{"valid":true,"user":{"username":"tester"},"token":"abc.def.ghi"}"#
                }),
            )
            .route("/garbled/api/session", get(|| async { "<html>oops</html>" }))
            .route("/slow/api/session", get(slow_session))
            .route(
                "/boom/api/session",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/ok/api/logout", post(|| async { StatusCode::NO_CONTENT }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        addr
    }

    fn api() -> ReqwestSessionApi {
        ReqwestSessionApi::new(Some("sid=test".into())).expect("client builds")
    }

    #[tokio::test]
    async fn valid_session_decodes() {
        let addr = spawn_server().await;
        let info = api()
            .fetch_session(&format!("http://{addr}/ok/api/session"), 2_000)
            .await
            .expect("session");
        assert!(info.valid);
        assert_eq!(info.username(), "tester");
        assert_eq!(info.token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn statuses_are_reported() {
        let addr = spawn_server().await;
        let missing = api()
            .fetch_session(&format!("http://{addr}/nope/api/session"), 2_000)
            .await
            .unwrap_err();
        assert_eq!(missing.status, Some(404));
        let boom = api()
            .fetch_session(&format!("http://{addr}/boom/api/session"), 2_000)
            .await
            .unwrap_err();
        assert_eq!(SessionFailure::classify(&boom), SessionFailure::ServerError);
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let addr = spawn_server().await;
        let failure = api()
            .fetch_session(&format!("http://{addr}/slow/api/session"), 50)
            .await
            .unwrap_err();
        assert_eq!(failure.code, Some(TransportCode::TimedOut));
        assert_eq!(SessionFailure::classify(&failure), SessionFailure::Timeout);
    }

    #[tokio::test]
    async fn garbled_body_is_not_a_session() {
        let addr = spawn_server().await;
        let failure = api()
            .fetch_session(&format!("http://{addr}/garbled/api/session"), 2_000)
            .await
            .unwrap_err();
        assert!(failure.status.is_none());
        assert!(failure.message.starts_with("invalid session body"));
    }

    /// Sends headers and part of the body, then goes quiet.
    async fn spawn_stalling_server() -> SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stalling server");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut request = [0_u8; 1024];
                    let _ = socket.read(&mut request).await;
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 80\r\n\r\n{\"valid\":tr",
                        )
                        .await;
                    let _ = socket.flush().await;
                    tokio::time::sleep(Duration::from_secs(5)).await;
                });
            }
        });
        addr
    }

    #[tokio::test]
    async fn stalled_body_times_out() {
        let addr = spawn_stalling_server().await;
        let started = std::time::Instant::now();
        let failure = api()
            .fetch_session(&format!("http://{addr}/api/session"), 200)
            .await
            .unwrap_err();
        assert_eq!(failure.code, Some(TransportCode::TimedOut));
        assert_eq!(SessionFailure::classify(&failure), SessionFailure::Timeout);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn unbuildable_request_reports_adapter_code() {
        let failure = api()
            .fetch_session("not a url", 2_000)
            .await
            .unwrap_err();
        assert_eq!(
            failure.code,
            Some(TransportCode::Other("ERR_BUILDER".into()))
        );
        assert!(matches!(
            SessionFailure::classify(&failure),
            SessionFailure::Unknown(_)
        ));
    }

    #[tokio::test]
    async fn closed_port_is_unavailable() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let failure = api()
            .fetch_session(&format!("http://{addr}/api/session"), 2_000)
            .await
            .unwrap_err();
        assert_eq!(
            SessionFailure::classify(&failure),
            SessionFailure::NetworkUnavailable
        );
    }

    #[tokio::test]
    async fn logout_accepts_no_content() {
        let addr = spawn_server().await;
        api()
            .logout(&format!("http://{addr}/ok/api/logout"))
            .await
            .expect("logout succeeds");
    }
}
