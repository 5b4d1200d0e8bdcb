//! Welcome page core
//!
//! Platform-agnostic logic behind the welcome page: the session gate that
//! decides between the user panel and a redirect to the authentication page,
//! and the "Would You Rather" choice game. Hosts (the browser front end, the
//! command-line tester) plug in through the collaborator traits below.

pub mod choice;
pub mod config;
pub mod failure;
pub mod gate;
pub mod messages;
pub mod session;

pub use choice::{CATALOG, Choice, ChoiceGame, ChoicePair, VoteSplit};
pub use config::GateConfig;
pub use failure::{NETWORK_ERROR_TEXT, RequestFailure, SessionFailure, TransportCode};
pub use gate::{
    DeferredTask, GatePhase, GateServices, GateView, SessionGate, check_session,
};
pub use messages::MessageKey;
pub use session::{SessionInfo, SessionUser};

/// Transport for the session API.
#[async_trait::async_trait(?Send)]
pub trait SessionApi {
    /// Fetch the current session, giving up after `timeout_ms`.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestFailure`] describing the HTTP status or transport
    /// problem.
    async fn fetch_session(
        &self,
        endpoint: &str,
        timeout_ms: u32,
    ) -> Result<SessionInfo, RequestFailure>;

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestFailure`] when the call does not succeed.
    async fn logout(&self, endpoint: &str) -> Result<(), RequestFailure>;
}

/// Localized message lookup.
pub trait Messages {
    fn text(&self, key: MessageKey) -> String;
}

/// User-visible transient notifications.
pub trait Notifier {
    fn notify_error(&self, text: &str);
    fn notify_info(&self, text: &str);
}

pub trait Navigator {
    fn navigate_to(&self, path: &str);
}

/// Deferred execution of gate tasks.
///
/// Implementations must hand the task back to [`SessionGate::fire`] once the
/// delay elapses, and should cancel pending tasks when the host is torn down.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: DeferredTask);
}
