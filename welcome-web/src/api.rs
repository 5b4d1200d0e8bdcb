//! Browser transport for the session API.

use futures::future::{Either, select};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use web_sys::{AbortController, RequestCredentials};
use welcome_core::{RequestFailure, SessionApi, SessionInfo};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("timeout of {0}ms exceeded")]
    Timeout(u32),
    #[error("Network Error: {0}")]
    Network(String),
    #[error("invalid response body: {0}")]
    Body(String),
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::JsError(js) => Self::Network(js.message),
            gloo_net::Error::SerdeError(err) => Self::Body(err.to_string()),
            gloo_net::Error::GlooError(msg) => Self::Network(msg),
        }
    }
}

impl From<ApiError> for RequestFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status(status) => Self::status(status),
            ApiError::Timeout(ms) => Self::timed_out(ms),
            ApiError::Network(detail) => Self::network(detail),
            ApiError::Body(detail) => Self::other(format!("invalid session body: {detail}")),
        }
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Status(response.status()))
    }
}

/// Race `exchange` (request and body read) against `timeout_ms`, aborting
/// the fetch through `controller` when the timer wins.
///
/// # Errors
///
/// Returns the exchange's own error, or [`ApiError::Timeout`] when it does
/// not finish in time.
#[allow(clippy::future_not_send)]
pub async fn within_deadline<T, F>(
    exchange: F,
    timeout_ms: u32,
    controller: Option<&AbortController>,
) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let exchange = Box::pin(exchange);
    let timer = Box::pin(TimeoutFuture::new(timeout_ms));
    match select(exchange, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            if let Some(controller) = controller {
                controller.abort();
            }
            Err(ApiError::Timeout(timeout_ms))
        }
    }
}

/// `fetch`-backed client that sends the page's cookies with every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpSessionApi;

impl HttpSessionApi {
    #[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
    async fn get_session(&self, endpoint: &str, timeout_ms: u32) -> Result<SessionInfo, ApiError> {
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(AbortController::signal);
        let request = Request::get(endpoint)
            .credentials(RequestCredentials::Include)
            .header("Accept", "application/json")
            .abort_signal(signal.as_ref())
            .build()?;

        let exchange = async move {
            let response = ensure_success(request.send().await?)?;
            Ok::<_, ApiError>(response.json::<SessionInfo>().await?)
        };
        within_deadline(exchange, timeout_ms, controller.as_ref()).await
    }

    #[allow(clippy::future_not_send)]
    async fn post_logout(&self, endpoint: &str) -> Result<(), ApiError> {
        let response = Request::post(endpoint)
            .credentials(RequestCredentials::Include)
            .send()
            .await?;
        ensure_success(response).map(|_| ())
    }
}

#[async_trait::async_trait(?Send)]
impl SessionApi for HttpSessionApi {
    async fn fetch_session(
        &self,
        endpoint: &str,
        timeout_ms: u32,
    ) -> Result<SessionInfo, RequestFailure> {
        self.get_session(endpoint, timeout_ms)
            .await
            .map_err(RequestFailure::from)
    }

    async fn logout(&self, endpoint: &str) -> Result<(), RequestFailure> {
        self.post_logout(endpoint).await.map_err(RequestFailure::from)
    }
}
